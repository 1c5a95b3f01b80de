use crate::config::SweepConfig;
use crate::database::retry_once;
use crate::entities::{
    CardPaymentStatus, CardStatus, NotificationKind, card_entity as cards,
};
use crate::error::AppResult;
use crate::models::SweepSummary;
use crate::services::NotificationService;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Periodic overdue sweep. Each run re-evaluates every card against the current
/// time; there is no persisted cursor, and re-running immediately is a no-op:
/// suspensions are conditional writes and reminders are unique per due date.
#[derive(Clone)]
pub struct SweepService {
    pool: DatabaseConnection,
    config: SweepConfig,
    notification_service: NotificationService,
}

pub(crate) fn is_suspension_target(
    status: &CardStatus,
    next_payment_due: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    *status == CardStatus::Active && next_payment_due < now
}

/// Days remaining if the due date falls inside (now, now + window_days],
/// rounded up so "due in 18 hours" reads as 1 day.
pub(crate) fn days_remaining_within(
    now: DateTime<Utc>,
    due: DateTime<Utc>,
    window_days: i64,
) -> Option<i64> {
    if due <= now || due > now + Duration::days(window_days) {
        return None;
    }
    let secs = (due - now).num_seconds();
    Some((secs + 86_399) / 86_400)
}

impl SweepService {
    pub fn new(
        pool: DatabaseConnection,
        config: SweepConfig,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            pool,
            config,
            notification_service,
        }
    }

    pub async fn run_sweep(&self) -> AppResult<SweepSummary> {
        let now = Utc::now();
        let mut summary = SweepSummary::default();

        // Pass 1: suspend every active card past its due date. No grace period.
        let overdue = retry_once(|| {
            cards::Entity::find()
                .filter(cards::Column::Status.eq(CardStatus::Active))
                .filter(cards::Column::NextPaymentDue.lt(now))
                .all(&self.pool)
        })
        .await?;

        for card in overdue {
            match self.suspend_overdue_card(&card, now).await {
                Ok(true) => summary.suspended += 1,
                Ok(false) => {} // a concurrent payment won the race
                Err(e) => {
                    // Partial-failure isolation: one bad card never aborts the run.
                    log::error!("Sweep failed to suspend card {}: {e:?}", card.id);
                }
            }
        }

        // Passes 2 and 3: escalating reminders for cards coming due. A card due
        // within the final window intentionally appears in both.
        summary.reminders_sent = self
            .remind_pass(now, self.config.reminder_days, NotificationKind::PaymentReminder)
            .await?;
        summary.final_reminders_sent = self
            .remind_pass(
                now,
                self.config.final_reminder_days,
                NotificationKind::FinalReminder,
            )
            .await?;

        Ok(summary)
    }

    /// Conditional suspend: only applies while the card is still active and
    /// still overdue, so a payment arriving mid-sweep is never overwritten.
    async fn suspend_overdue_card(
        &self,
        card: &cards::Model,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        if !is_suspension_target(&card.status, card.next_payment_due, now) {
            return Ok(false);
        }

        let update = cards::ActiveModel {
            payment_status: Set(CardPaymentStatus::Invalid),
            status: Set(CardStatus::Suspended),
            is_enabled: Set(false),
            suspension_reason: Set(Some("Payment not received".to_string())),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        let res = retry_once(|| {
            cards::Entity::update_many()
                .set(update.clone())
                .filter(cards::Column::Id.eq(card.id))
                .filter(cards::Column::Status.eq(CardStatus::Active))
                .filter(cards::Column::NextPaymentDue.lt(now))
                .exec(&self.pool)
        })
        .await?;

        if res.rows_affected == 0 {
            return Ok(false);
        }

        self.notification_service
            .emit(
                card.customer_id,
                card.id,
                NotificationKind::CardSuspended,
                card.next_payment_due,
                None,
                "Your card has been suspended: payment not received".to_string(),
            )
            .await?;

        Ok(true)
    }

    async fn remind_pass(
        &self,
        now: DateTime<Utc>,
        window_days: i64,
        kind: NotificationKind,
    ) -> AppResult<u64> {
        let due_soon = retry_once(|| {
            cards::Entity::find()
                .filter(cards::Column::Status.eq(CardStatus::Active))
                .filter(cards::Column::PaymentStatus.eq(CardPaymentStatus::Valid))
                .filter(cards::Column::IsEnabled.eq(true))
                .filter(cards::Column::NextPaymentDue.gt(now))
                .filter(cards::Column::NextPaymentDue.lte(now + Duration::days(window_days)))
                .all(&self.pool)
        })
        .await?;

        let mut sent = 0u64;
        for card in due_soon {
            let Some(days) = days_remaining_within(now, card.next_payment_due, window_days) else {
                continue;
            };
            let message = match kind {
                NotificationKind::FinalReminder => format!(
                    "Final reminder: your card payment is due in {days} day(s)"
                ),
                _ => format!("Reminder: your card payment is due in {days} day(s)"),
            };
            match self
                .notification_service
                .emit(
                    card.customer_id,
                    card.id,
                    kind.clone(),
                    card.next_payment_due,
                    Some(days),
                    message,
                )
                .await
            {
                Ok(true) => sent += 1,
                Ok(false) => {} // already emitted for this due date
                Err(e) => {
                    log::error!("Sweep failed to emit {kind} for card {}: {e:?}", card.id);
                }
            }
        }
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_overdue_active_card_is_suspension_target() {
        let now = utc(2024, 6, 2, 0);
        assert!(is_suspension_target(&CardStatus::Active, utc(2024, 6, 1, 0), now));
        assert!(!is_suspension_target(&CardStatus::Active, utc(2024, 6, 3, 0), now));
    }

    #[test]
    fn test_sweep_is_idempotent_on_suspension() {
        let now = utc(2024, 6, 2, 0);
        let due = utc(2024, 6, 1, 0);
        // First run suspends the card; the suspended card no longer matches,
        // so an immediate second run has nothing left to do.
        assert!(is_suspension_target(&CardStatus::Active, due, now));
        assert!(!is_suspension_target(&CardStatus::Suspended, due, now));
    }

    #[test]
    fn test_reminder_window_boundaries() {
        let now = utc(2024, 6, 1, 0);
        // exactly on the 3-day boundary: included
        assert_eq!(days_remaining_within(now, utc(2024, 6, 4, 0), 3), Some(3));
        // beyond the window
        assert_eq!(days_remaining_within(now, utc(2024, 6, 4, 1), 3), None);
        // already due
        assert_eq!(days_remaining_within(now, now, 3), None);
        assert_eq!(days_remaining_within(now, utc(2024, 5, 30, 0), 3), None);
    }

    #[test]
    fn test_card_due_in_18_hours_hits_both_windows() {
        let now = utc(2024, 6, 1, 0);
        let due = utc(2024, 6, 1, 18);
        assert_eq!(days_remaining_within(now, due, 3), Some(1));
        assert_eq!(days_remaining_within(now, due, 1), Some(1));
    }
}
