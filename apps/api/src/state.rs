use std::sync::Arc;

use crate::config::Config;
use crate::store::TrackerStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Production: `PgStore`.
    pub store: Arc<dyn TrackerStore>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State backed by an empty in-memory store and a fixed signing secret.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(crate::store::memory::MemoryStore::default()),
            config: Config {
                database_url: "postgres://unused".to_string(),
                jwt_secret: "test-secret".to_string(),
                token_ttl_hours: 1,
                bcrypt_cost: crate::auth::password::TEST_BCRYPT_COST,
                port: 0,
                rust_log: "debug".to_string(),
            },
        }
    }
}
