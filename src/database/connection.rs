use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::future::Future;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections);
    let pool = Database::connect(opts).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DatabaseConnection) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}

/// Run a single non-transactional database operation, retrying once on failure
/// before surfacing the error. Must not wrap statements inside an open
/// transaction: a failed transaction is already aborted and cannot be resumed.
pub async fn retry_once<T, F, Fut>(op: F) -> Result<T, DbErr>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    match op().await {
        Ok(v) => Ok(v),
        Err(e) => {
            log::warn!("Database operation failed, retrying once: {e}");
            op().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_retry_once_recovers_from_transient_failure() {
        let attempts = Cell::new(0);
        let result = retry_once(|| {
            let n = attempts.get() + 1;
            attempts.set(n);
            async move {
                if n == 1 {
                    Err(DbErr::Custom("transient".to_string()))
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts.get(), 2);
    }

    #[tokio::test]
    async fn test_retry_once_surfaces_second_failure() {
        let attempts = Cell::new(0);
        let result: Result<(), DbErr> = retry_once(|| {
            attempts.set(attempts.get() + 1);
            async { Err(DbErr::Custom("still down".to_string())) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.get(), 2);
    }
}
