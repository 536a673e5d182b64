//! MySQL-backed route store.
//!
//! # Responsibilities
//! - Own the process-wide connection pool (shared read-only)
//! - Startup route listing
//! - Per-request configuration fetch with exactly-one semantics
//!
//! # Design Decisions
//! - Every request pays a full round trip; there is deliberately no
//!   cache layer between the handler and the store
//! - Fetches are bounded by the configured timeout so a stalled store
//!   cannot pin request handlers indefinitely

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::MySqlPool;

use crate::config::StoreConfig;
use crate::store::types::{RouteDefinition, RouteSpec, RouteStore, StoreError, StoreResult};

const LIST_ROUTES: &str = "SELECT method, path FROM path_mapping";

const ROUTE_CONFIG: &str = "SELECT \
    token_type, token_value, ssh_authorize_type, ssh_authorize_value, \
    ssh_host, ssh_port, ssh_user, ssh_command \
    FROM path_mapping WHERE path = ? AND method = ?";

/// Route store backed by a shared MySQL pool.
pub struct MySqlRouteStore {
    pool: MySqlPool,
    fetch_timeout: Duration,
}

impl MySqlRouteStore {
    /// Open the store connection pool.
    pub async fn connect(config: &StoreConfig, fetch_timeout: Duration) -> StoreResult<Self> {
        let pool = MySqlPool::connect(&config.connection_url())
            .await
            .map_err(StoreError::Connect)?;

        Ok(Self {
            pool,
            fetch_timeout,
        })
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, sqlx::Error>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.fetch_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::Query),
            Err(_) => Err(StoreError::Timeout(self.fetch_timeout)),
        }
    }
}

#[async_trait]
impl RouteStore for MySqlRouteStore {
    async fn list_routes(&self) -> StoreResult<Vec<RouteDefinition>> {
        self.bounded(
            sqlx::query_as::<_, RouteDefinition>(LIST_ROUTES).fetch_all(&self.pool),
        )
        .await
    }

    async fn route_config(&self, method: &str, path: &str) -> StoreResult<RouteSpec> {
        let rows = self
            .bounded(
                sqlx::query_as::<_, RouteSpec>(ROUTE_CONFIG)
                    .bind(path)
                    .bind(method)
                    .fetch_all(&self.pool),
            )
            .await?;

        if rows.len() > 1 {
            return Err(StoreError::Ambiguous {
                method: method.to_string(),
                path: path.to_string(),
                count: rows.len(),
            });
        }

        match rows.into_iter().next() {
            Some(row) => Ok(row),
            None => Err(StoreError::Missing {
                method: method.to_string(),
                path: path.to_string(),
            }),
        }
    }
}
