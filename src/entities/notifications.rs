use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_kind")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[sea_orm(string_value = "payment_reminder")]
    PaymentReminder,
    #[sea_orm(string_value = "final_reminder")]
    FinalReminder,
    #[sea_orm(string_value = "card_suspended")]
    CardSuspended,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::PaymentReminder => write!(f, "payment_reminder"),
            NotificationKind::FinalReminder => write!(f, "final_reminder"),
            NotificationKind::CardSuspended => write!(f, "card_suspended"),
        }
    }
}

/// Sweep event outbox. The unique (card_id, kind, due_at) key makes emission
/// idempotent across repeated sweep runs over the same due date.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customer_id: i64,
    pub card_id: i64,
    pub kind: NotificationKind,
    /// The next_payment_due the event refers to.
    pub due_at: DateTime<Utc>,
    pub days_remaining: Option<i64>,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
