use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
}

/// Contains parameters for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The interface the server binds to (e.g., "0.0.0.0").
    pub host: String,
    /// The TCP port the server listens on.
    pub port: u16,
}

/// Contains parameters for the PostgreSQL connection pool.
///
/// The connection string itself (`DATABASE_URL`) is a secret and is read
/// from the environment, not from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Upper bound on simultaneously open database connections. This also
    /// bounds the number of concurrently open unit-of-work scopes.
    pub max_connections: u32,
    /// How long a unit of work may wait for a pooled connection before
    /// giving up.
    pub acquire_timeout_secs: u64,
}

/// Contains parameters for the read-through cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Whether cached reads are enabled at all. When false, every read
    /// goes straight to the database.
    pub enabled: bool,
    /// Time-to-live for cache entries, in seconds. Staleness after a write
    /// is bounded by this value; there is no write-side invalidation.
    pub ttl_secs: u64,
}
