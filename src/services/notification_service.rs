use crate::entities::{NotificationKind, notification_entity as notifications};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};

/// Notification outbox written by the overdue sweep. Delivery itself happens
/// out-of-process; this service only records the events, keyed uniquely on
/// (card_id, kind, due_at) so repeated sweep runs never duplicate them.
#[derive(Clone)]
pub struct NotificationService {
    pool: DatabaseConnection,
}

impl NotificationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Record an event. Returns false when the same event for the same due
    /// date already exists.
    pub async fn emit(
        &self,
        customer_id: i64,
        card_id: i64,
        kind: NotificationKind,
        due_at: DateTime<Utc>,
        days_remaining: Option<i64>,
        message: String,
    ) -> AppResult<bool> {
        let row = notifications::ActiveModel {
            customer_id: Set(customer_id),
            card_id: Set(card_id),
            kind: Set(kind),
            due_at: Set(due_at),
            days_remaining: Set(days_remaining),
            message: Set(message),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        };

        let res = notifications::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    notifications::Column::CardId,
                    notifications::Column::Kind,
                    notifications::Column::DueAt,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(&self.pool)
            .await;

        match res {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
