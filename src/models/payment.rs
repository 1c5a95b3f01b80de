use crate::entities::{RenewalMethod, billing_record_entity as billing};
use crate::models::CardResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Operator-entered payment against an arbitrary card.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    pub amount_cents: i64,
    pub method: RenewalMethod,
    pub external_reference: Option<String>,
    pub notes: Option<String>,
}

/// Self-service renewal of the caller's own card.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SelfRenewRequest {
    pub amount_cents: i64,
    pub method: Option<RenewalMethod>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub card: CardResponse,
    pub months_applied: i32,
    pub amount_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillingRecordResponse {
    pub id: i64,
    pub card_id: i64,
    pub customer_id: i64,
    pub amount_cents: i64,
    pub months_applied: i32,
    pub method: RenewalMethod,
    pub external_reference: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<billing::Model> for BillingRecordResponse {
    fn from(m: billing::Model) -> Self {
        Self {
            id: m.id,
            card_id: m.card_id,
            customer_id: m.customer_id,
            amount_cents: m.amount_cents,
            months_applied: m.months_applied,
            method: m.method,
            external_reference: m.external_reference,
            recorded_by: m.recorded_by,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
