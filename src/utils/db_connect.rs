// src/utils/db_connect.rs
use anyhow::{Context, Result};
use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use log::info;
use std::time::Duration;
use tokio_postgres::{Config, NoTls};

pub type PgPool = Pool<PostgresConnectionManager<NoTls>>;

/// Connection settings read from `POSTGRES_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub max_pool_size: u32,
}

impl DbSettings {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("POSTGRES_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(5432),
            dbname: std::env::var("POSTGRES_DB").unwrap_or_else(|_| "layoff_tracker".to_string()),
            user: std::env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("POSTGRES_PASSWORD").unwrap_or_default(),
            max_pool_size: std::env::var("POSTGRES_POOL_SIZE")
                .ok()
                .and_then(|p| p.parse::<u32>().ok())
                .unwrap_or(16),
        }
    }

    fn pg_config(&self) -> Config {
        info!(
            "DB Config: Host={}, Port={}, DB={}, User={}",
            self.host, self.port, self.dbname, self.user
        );
        let mut config = Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user)
            .password(&self.password);
        config.application_name("layoff_normalizer");
        config.connect_timeout(Duration::from_secs(10));
        config
    }
}

/// Builds the pool and checks it with a trivial query.
pub async fn connect() -> Result<PgPool> {
    connect_with(&DbSettings::from_env()).await
}

pub async fn connect_with(settings: &DbSettings) -> Result<PgPool> {
    info!("Connecting to PostgreSQL database...");
    let manager = PostgresConnectionManager::new(settings.pg_config(), NoTls);

    let pool = Pool::builder()
        .max_size(settings.max_pool_size)
        .min_idle(Some(1))
        .idle_timeout(Some(Duration::from_secs(180)))
        .connection_timeout(Duration::from_secs(15))
        .build(manager)
        .await
        .context("Failed to build database connection pool")?;

    {
        let conn = pool
            .get()
            .await
            .context("Failed to get test connection from pool")?;
        conn.query_one("SELECT 1", &[])
            .await
            .context("Test query 'SELECT 1' failed")?;
    }
    info!("Database connection pool initialized successfully.");
    Ok(pool)
}

/// (connections, idle_connections)
pub fn get_pool_status(pool: &PgPool) -> (u32, u32) {
    let state = pool.state();
    (state.connections, state.idle_connections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_settings_from_env() {
        std::env::set_var("POSTGRES_HOST", "db.internal");
        std::env::set_var("POSTGRES_PORT", "not-a-port");
        std::env::set_var("POSTGRES_DB", "tracker_test");
        std::env::set_var("POSTGRES_POOL_SIZE", "4");

        let settings = DbSettings::from_env();
        assert_eq!(settings.host, "db.internal");
        assert_eq!(settings.port, 5432);
        assert_eq!(settings.dbname, "tracker_test");
        assert_eq!(settings.max_pool_size, 4);

        std::env::remove_var("POSTGRES_HOST");
        std::env::remove_var("POSTGRES_PORT");
        std::env::remove_var("POSTGRES_DB");
        std::env::remove_var("POSTGRES_POOL_SIZE");
    }
}
