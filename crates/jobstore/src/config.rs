//! Store configuration and connection setup.
//!
//! The store handle is constructed explicitly and passed to model methods;
//! there is no process-wide database singleton.

use crate::error::{StoreError, StoreResult};

/// Connection settings for the store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
}

impl StoreConfig {
    /// Read settings from the environment (`DATABASE_URL`).
    pub fn from_env() -> StoreResult<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::Connection("DATABASE_URL is not set".to_string()))?;
        Ok(Self { database_url })
    }
}

/// Connect to Postgres and drive the connection on a background task.
pub async fn connect(config: &StoreConfig) -> StoreResult<tokio_postgres::Client> {
    let (client, connection) = tokio_postgres::connect(&config.database_url, tokio_postgres::NoTls)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!(error = %e, "postgres connection error");
        }
    });

    Ok(client)
}
