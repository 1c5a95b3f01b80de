pub mod admin;
pub mod auth;
pub mod card;
pub mod customer;
pub mod recruitment;

pub use admin::admin_config;
pub use auth::auth_config;
pub use card::{card_config, pos_config};
pub use customer::customer_config;
pub use recruitment::recruitment_config;

use crate::error::AppError;
use crate::middlewares::Principal;
use crate::utils::PrincipalRole;
use actix_web::{HttpMessage, HttpRequest};

pub(crate) fn get_principal(req: &HttpRequest) -> Option<Principal> {
    req.extensions().get::<Principal>().copied()
}

/// Enforce the caller's role and return their principal id.
pub(crate) fn require_role(req: &HttpRequest, role: PrincipalRole) -> Result<i64, AppError> {
    match get_principal(req) {
        Some(p) if p.role == role => Ok(p.id),
        Some(_) => Err(AppError::Forbidden),
        None => Err(AppError::AuthError("Missing access token".to_string())),
    }
}
