use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, ConfigError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SeaORM connection over the sqlx pool that ran the migrations
    pub db: DatabaseConnection,
}

impl AppState {
    /// Create a new AppState by connecting to PostgreSQL and running migrations
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let options = config.database.connect_options()?;

        let pg_pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        // SeaORM shares the same pool
        let db = SqlxPostgresConnector::from_sqlx_postgres_pool(pg_pool);

        Ok(Self { db })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
