//! Shared application state injected into all Axum handlers.

use crate::api::auth::BearerToken;
use crate::persistence::SqliteStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Built once at startup from [`crate::config::AppConfig`]; nothing in it
/// changes while the server runs.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Task and journal storage.
    pub store: SqliteStore,
    /// Credential the authorization gate compares against.
    pub auth: BearerToken,
}

impl AppState {
    /// Bundles a store with the shared secret.
    #[must_use]
    pub fn new(store: SqliteStore, secret: &str) -> Self {
        Self {
            store,
            auth: BearerToken::new(secret),
        }
    }
}
