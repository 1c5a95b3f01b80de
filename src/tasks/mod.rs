//! Background scheduled tasks for the application.
//!
//! The only recurring job is the overdue sweep: suspend cards past their
//! payment due date and emit escalating reminders. Call `spawn_all` once
//! during startup to launch it.

use crate::services::SweepService;

/// Spawn all background tasks.
///
/// Notes
/// - The sweep is idempotent as implemented in its service; running it again
///   immediately produces no further side effects.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(sweep_service: SweepService, sweep_interval_secs: u64) {
    {
        let svc = sweep_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.run_sweep().await {
                    Ok(summary) => {
                        if summary.suspended > 0
                            || summary.reminders_sent > 0
                            || summary.final_reminders_sent > 0
                        {
                            log::info!(
                                "Overdue sweep: suspended={} reminders={} final_reminders={}",
                                summary.suspended,
                                summary.reminders_sent,
                                summary.final_reminders_sent
                            );
                        }
                    }
                    Err(e) => log::error!("Overdue sweep failed: {e:?}"),
                }
                tokio::time::sleep(std::time::Duration::from_secs(sweep_interval_secs)).await;
            }
        });
    }
}
