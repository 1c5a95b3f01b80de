pub mod auth;
pub mod card;
pub mod common;
pub mod customer;
pub mod pagination;
pub mod payment;
pub mod pending_customer;
pub mod sweep;

pub use auth::*;
pub use card::*;
pub use common::*;
pub use customer::*;
pub use pagination::*;
pub use payment::*;
pub use pending_customer::*;
pub use sweep::*;
