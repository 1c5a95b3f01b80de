pub use sea_orm_migration::prelude::*;

mod m20250530_000001_initial;
mod m20250606_000001_add_pending_customers;
mod m20250612_000001_add_notifications_and_billing;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250530_000001_initial::Migration),
            Box::new(m20250606_000001_add_pending_customers::Migration),
            Box::new(m20250612_000001_add_notifications_and_billing::Migration),
        ]
    }
}
