use super::card_renewals::RenewalMethod;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Billing audit mirror written by the payment recorder. Below-minimum payments
/// are recorded here too, with zero months applied.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "billing_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub card_id: i64,
    pub customer_id: i64,
    pub amount_cents: i64,
    pub months_applied: i32,
    pub method: RenewalMethod,
    pub external_reference: Option<String>,
    /// Admin id for operator-recorded payments; NULL for self-service.
    pub recorded_by: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
