pub mod connection;

pub use connection::{create_pool, retry_once, run_migrations};
