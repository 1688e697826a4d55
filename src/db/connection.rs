use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::DatabaseConfig;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    Ok(db)
}

/// Creates or alters tables so they match the entity definitions. Run once
/// at startup, before anything touches the pool.
pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    tracing::info!("syncing database schema from entities");
    db.get_schema_registry("korsvagen_server::db::entities::*")
        .sync(db)
        .await?;
    Ok(())
}
