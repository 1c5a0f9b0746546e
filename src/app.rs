use crate::config::AppConfig;
use crate::{db, logging::init_logging};
use tracing::info;

/// Brings the database schema up to date and exits.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_logging(&config.logging)?;

    let connection = db::connect(&config.database).await?;
    let applied = db::migrate(&connection).await?;
    info!(applied = applied.len(), "Migrations finished");

    connection.close().await?;
    Ok(())
}
