use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

use crate::config::AppConfig;

/// Create a SeaORM connection.
pub async fn create_orm_conn(config: &AppConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(config.sql_log);
    let conn = Database::connect(options).await?;
    tracing::debug!(
        backend = ?conn.get_database_backend(),
        max_connections = config.max_connections,
        "database connected"
    );
    Ok(conn)
}
