use crate::entities::{
    CardPaymentStatus, CardStatus, RenewalMethod, card_entity as cards,
    card_renewal_entity as renewals,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardResponse {
    pub id: i64,
    pub card_number: String,
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
    pub created_at: DateTime<Utc>,
}

impl From<cards::Model> for CardResponse {
    fn from(m: cards::Model) -> Self {
        Self {
            id: m.id,
            card_number: m.card_number,
            customer_id: m.customer_id,
            monthly_fee_cents: m.monthly_fee_cents,
            valid_until: m.valid_until,
            next_payment_due: m.next_payment_due,
            payment_status: m.payment_status,
            status: m.status,
            is_enabled: m.is_enabled,
            suspension_reason: m.suspension_reason,
            total_savings_cents: m.total_savings_cents,
            total_transactions: m.total_transactions,
            last_used_at: m.last_used_at,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RenewalEntryResponse {
    pub id: i64,
    pub amount_paid_cents: i64,
    pub months_added: i32,
    pub valid_until_after: DateTime<Utc>,
    pub method: RenewalMethod,
    pub external_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<renewals::Model> for RenewalEntryResponse {
    fn from(m: renewals::Model) -> Self {
        Self {
            id: m.id,
            amount_paid_cents: m.amount_paid_cents,
            months_added: m.months_added,
            valid_until_after: m.valid_until_after,
            method: m.method,
            external_reference: m.external_reference,
            notes: m.notes,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardStatusResponse {
    pub card: CardResponse,
    pub renewal_history: Vec<RenewalEntryResponse>,
}

/// POS validation result for `GET /cards/{card_number}/usability`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardUsabilityResponse {
    pub usable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub days_remaining: i64,
}

/// POS usage report: the discount granted on a completed sale.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecordUsageRequest {
    pub amount_saved_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkCardRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuspendCardRequest {
    pub reason: String,
}
