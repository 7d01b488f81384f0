//! Connection pool setup for the word store.
//!
//! [`PoolConfig`] owns every tunable and knows how to turn itself into a
//! live [`PgPool`]; callers go through [`PoolConfig::connect`] (or the
//! [`crate::Database`] wrappers) rather than touching sqlx options directly.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

use mnema_core::{Error, Result};

/// Pool sizing and timeout tunables.
///
/// Defaults suit a single API process plus the enrichment job sharing one
/// Postgres instance. Field names follow the sqlx option they map onto.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long `acquire()` waits for a free connection before erroring.
    pub acquire_timeout: Duration,
    /// Idle connections are closed after this long.
    pub idle_timeout: Duration,
    /// Connections are recycled after this long, `None` to keep forever.
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

impl PoolConfig {
    /// Defaults overridden by `POOL_MAX_CONNECTIONS`, `POOL_MIN_CONNECTIONS`,
    /// and `POOL_ACQUIRE_TIMEOUT_SECS` where set.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            max_connections: env_u32("POOL_MAX_CONNECTIONS").unwrap_or(base.max_connections),
            min_connections: env_u32("POOL_MIN_CONNECTIONS").unwrap_or(base.min_connections),
            acquire_timeout: env_u32("POOL_ACQUIRE_TIMEOUT_SECS")
                .map(|secs| Duration::from_secs(secs as u64))
                .unwrap_or(base.acquire_timeout),
            ..base
        }
    }

    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    pub fn min_connections(mut self, n: u32) -> Self {
        self.min_connections = n;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn max_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Open a pool against `database_url` with this configuration.
    ///
    /// Logs the effective tunables before connecting and the pool state
    /// once connected, so misconfigured sizing shows up at startup.
    pub async fn connect(self, database_url: &str) -> Result<PgPool> {
        let start = Instant::now();

        info!(
            subsystem = "db",
            component = "pool",
            op = "connect",
            max_connections = self.max_connections,
            min_connections = self.min_connections,
            acquire_timeout_secs = self.acquire_timeout.as_secs(),
            idle_timeout_secs = self.idle_timeout.as_secs(),
            "Opening word store connection pool"
        );

        let mut options = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout);
        if let Some(max_lifetime) = self.max_lifetime {
            options = options.max_lifetime(max_lifetime);
        }

        let pool = options
            .connect(database_url)
            .await
            .map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "pool",
            op = "connect",
            pool_size = pool.size(),
            pool_idle = pool.num_idle(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Word store connection pool ready"
        );
        Ok(pool)
    }
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Emit pool occupancy at debug level, warning when every connection is
/// checked out.
pub fn log_pool_metrics(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle();

    debug!(
        subsystem = "db",
        component = "pool",
        op = "metrics",
        pool_size = size,
        pool_idle = idle,
        "Pool occupancy"
    );

    if idle == 0 && size > 0 {
        warn!(
            subsystem = "db",
            component = "pool",
            pool_size = size,
            "Every pooled connection is checked out"
        );
    }
}
