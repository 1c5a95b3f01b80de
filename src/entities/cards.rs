use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "card_payment_status")]
#[serde(rename_all = "snake_case")]
pub enum CardPaymentStatus {
    #[sea_orm(string_value = "valid")]
    Valid,
    #[sea_orm(string_value = "invalid")]
    Invalid,
}

impl std::fmt::Display for CardPaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardPaymentStatus::Valid => write!(f, "valid"),
            CardPaymentStatus::Invalid => write!(f, "invalid"),
        }
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "card_status")]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "suspended")]
    Suspended,
    /// Terminal; reachable only through an explicit cancel action.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardStatus::Active => write!(f, "active"),
            CardStatus::Expired => write!(f, "expired"),
            CardStatus::Suspended => write!(f, "suspended"),
            CardStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One membership card per customer. A card is usable for discounts iff
/// `is_enabled && status == Active && payment_status == Valid && valid_until > now`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub card_number: String,
    #[sea_orm(unique)]
    pub customer_id: i64,
    pub monthly_fee_cents: i64,
    pub valid_until: DateTime<Utc>,
    pub next_payment_due: DateTime<Utc>,
    pub payment_status: CardPaymentStatus,
    pub status: CardStatus,
    pub is_enabled: bool,
    pub suspension_reason: Option<String>,
    pub total_savings_cents: i64,
    pub total_transactions: i64,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
