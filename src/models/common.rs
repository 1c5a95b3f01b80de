use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error half of the response envelope; the success half is assembled inline
/// by the handlers and `AppError::error_response` builds this one.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}
