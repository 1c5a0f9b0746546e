//! Connection setup and schema migration.

use crate::config::DatabaseConfig;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(config.sqlx_logging);

    Database::connect(options).await
}

/// Applies every pending migration and returns their names in order.
pub async fn migrate(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    let pending: Vec<String> = Migrator::get_pending_migrations(db)
        .await?
        .iter()
        .map(|migration| migration.name().to_string())
        .collect();

    if pending.is_empty() {
        info!("Database schema is up to date");
        return Ok(pending);
    }

    Migrator::up(db, None).await?;
    for name in &pending {
        info!(migration = %name, "Applied migration");
    }
    Ok(pending)
}

/// Reverts every applied migration.
pub async fn rollback(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::down(db, None).await?;
    info!("Reverted all migrations");
    Ok(())
}
