use crate::entities::customer_entity as customers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub full_name: String,
    pub phone: String,
    pub id_number: Option<String>,
    pub location: Option<String>,
    /// Optional initial credentials; without them the account cannot log in.
    pub password: Option<String>,
    pub months_purchased: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub id_number: Option<String>,
    pub location: Option<String>,
    pub can_login: bool,
    pub membership_months: i32,
    pub membership_valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<customers::Model> for CustomerResponse {
    fn from(m: customers::Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            phone: m.phone,
            id_number: m.id_number,
            location: m.location,
            can_login: m.can_login,
            membership_months: m.membership_months,
            membership_valid_until: m.membership_valid_until,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
