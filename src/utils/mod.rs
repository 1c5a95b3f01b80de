pub mod card_number;
pub mod dates;
pub mod jwt;
pub mod password;
pub mod phone;

pub use card_number::derive_card_number;
pub use dates::{add_months_clamped, sub_months_clamped};
pub use jwt::*;
pub use password::*;
pub use phone::{normalize_phone, validate_phone};
