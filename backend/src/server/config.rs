//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use recipes_backend::outbound::persistence::DbPool;
use recipes_backend::settings::RunMode;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) run_mode: RunMode,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cache_url: Option<String>,
}

impl ServerConfig {
    /// Construct a server configuration without external collaborators.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, run_mode: RunMode) -> Self {
        Self {
            bind_addr,
            run_mode,
            db_pool: None,
            cache_url: None,
        }
    }

    /// Attach a database connection pool for the recipe store.
    ///
    /// Without a pool the server keeps recipes in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the Redis URL for the recipe list cache.
    #[must_use]
    pub fn with_cache_url(mut self, url: impl Into<String>) -> Self {
        self.cache_url = Some(url.into());
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
