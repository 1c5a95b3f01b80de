use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-run summary returned by the overdue sweep. Counts reflect newly applied
/// side effects only, so an immediate re-run reports zeros.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SweepSummary {
    pub suspended: u64,
    pub reminders_sent: u64,
    pub final_reminders_sent: u64,
}
