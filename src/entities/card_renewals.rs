use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "renewal_method")]
#[serde(rename_all = "snake_case")]
pub enum RenewalMethod {
    /// Entry written when the card is first created.
    #[sea_orm(string_value = "initial")]
    Initial,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    #[sea_orm(string_value = "operator")]
    Operator,
    #[sea_orm(string_value = "self_service")]
    SelfService,
    /// Administrative mark-valid/mark-invalid override, no payment consumed.
    #[sea_orm(string_value = "manual_override")]
    ManualOverride,
}

impl std::fmt::Display for RenewalMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenewalMethod::Initial => write!(f, "initial"),
            RenewalMethod::Cash => write!(f, "cash"),
            RenewalMethod::BankTransfer => write!(f, "bank_transfer"),
            RenewalMethod::Operator => write!(f, "operator"),
            RenewalMethod::SelfService => write!(f, "self_service"),
            RenewalMethod::ManualOverride => write!(f, "manual_override"),
        }
    }
}

/// Append-only renewal history. Rows are never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "card_renewals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub card_id: i64,
    pub amount_paid_cents: i64,
    pub months_added: i32,
    pub valid_until_after: DateTime<Utc>,
    pub method: RenewalMethod,
    pub external_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
