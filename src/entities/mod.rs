pub mod admins;
pub mod billing_records;
pub mod card_renewals;
pub mod cards;
pub mod customers;
pub mod marketers;
pub mod notifications;
pub mod pending_customers;

pub use admins as admin_entity;
pub use billing_records as billing_record_entity;
pub use card_renewals as card_renewal_entity;
pub use cards as card_entity;
pub use customers as customer_entity;
pub use marketers as marketer_entity;
pub use notifications as notification_entity;
pub use pending_customers as pending_customer_entity;

pub use card_renewals::RenewalMethod;
pub use cards::{CardPaymentStatus, CardStatus};
pub use notifications::NotificationKind;
pub use pending_customers::PendingStatus;
