pub mod auth_service;
pub mod card_service;
pub mod customer_service;
pub mod notification_service;
pub mod payment_service;
pub mod recruitment_service;
pub mod sweep_service;

pub use auth_service::*;
pub use card_service::*;
pub use customer_service::*;
pub use notification_service::*;
pub use payment_service::*;
pub use recruitment_service::*;
pub use sweep_service::*;
