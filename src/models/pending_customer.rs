use crate::entities::{PendingStatus, pending_customer_entity as pending};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitRecruitRequest {
    pub full_name: String,
    pub phone: String,
    pub id_number: Option<String>,
    pub location: Option<String>,
    pub months_purchased: i32,
    /// Defaults to now when omitted.
    pub registration_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RejectRecruitRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PendingListQuery {
    pub status: Option<PendingStatus>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PendingCustomerResponse {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub id_number: Option<String>,
    pub location: Option<String>,
    pub submitted_by: i64,
    pub registration_date: DateTime<Utc>,
    pub months_purchased: i32,
    pub valid_until_at_approval: DateTime<Utc>,
    pub status: PendingStatus,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub resulting_customer_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<pending::Model> for PendingCustomerResponse {
    fn from(m: pending::Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            phone: m.phone,
            id_number: m.id_number,
            location: m.location,
            submitted_by: m.submitted_by,
            registration_date: m.registration_date,
            months_purchased: m.months_purchased,
            valid_until_at_approval: m.valid_until_at_approval,
            status: m.status,
            reviewed_by: m.reviewed_by,
            reviewed_at: m.reviewed_at,
            rejection_reason: m.rejection_reason,
            resulting_customer_id: m.resulting_customer_id,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApprovalResponse {
    pub pending: PendingCustomerResponse,
    pub customer_id: i64,
    pub card_id: i64,
    pub commission_cents: i64,
}
