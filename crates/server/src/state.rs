//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use pvz_core::AllowedCities;

use crate::services::{CredentialAuthority, ProductLedger, PvzRegistry, ReceptionManager};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the city whitelist.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    cities: AllowedCities,
    credentials: Arc<dyn CredentialAuthority>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `pool` - `PostgreSQL` connection pool
    /// * `cities` - Cities accepted by the registry
    /// * `credentials` - Authority that issues and verifies bearer tokens
    #[must_use]
    pub fn new(
        pool: PgPool,
        cities: AllowedCities,
        credentials: Arc<dyn CredentialAuthority>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                cities,
                credentials,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the credential authority.
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialAuthority {
        self.inner.credentials.as_ref()
    }

    /// Pickup-point registry bound to this state.
    #[must_use]
    pub fn registry(&self) -> PvzRegistry<'_> {
        PvzRegistry::new(&self.inner.pool, &self.inner.cities)
    }

    /// Reception manager bound to this state.
    #[must_use]
    pub fn receptions(&self) -> ReceptionManager<'_> {
        ReceptionManager::new(&self.inner.pool)
    }

    /// Product ledger bound to this state.
    #[must_use]
    pub fn ledger(&self) -> ProductLedger<'_> {
        ProductLedger::new(&self.inner.pool)
    }
}
