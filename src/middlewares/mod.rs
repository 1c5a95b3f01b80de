pub mod auth;
pub mod cors;

pub use auth::{AuthMiddleware, Principal};
pub use cors::create_cors;
