use crate::utils::jwt::PrincipalRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Phone for customers/marketers, username for admins.
    pub identity: String,
    pub password: String,
    pub role: LoginRole,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoginRole {
    Customer,
    Marketer,
    Admin,
}

impl From<LoginRole> for PrincipalRole {
    fn from(r: LoginRole) -> Self {
        match r {
            LoginRole::Customer => PrincipalRole::Customer,
            LoginRole::Marketer => PrincipalRole::Marketer,
            LoginRole::Admin => PrincipalRole::Admin,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}
