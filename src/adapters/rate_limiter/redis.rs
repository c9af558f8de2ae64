//! Redis-backed counter store for production deployments.
//!
//! INCR and TTL are pipelined in one MULTI/EXEC round trip; EXPIRE is sent
//! only when a window starts. Each round trip is bounded by the configured
//! timeout.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::future::Future;
use std::time::Duration;

use crate::config::RedisConfig;
use crate::ports::{CounterReading, CounterStore, CounterStoreError};

/// Redis counter store.
#[derive(Clone)]
pub struct RedisCounterStore {
    conn: MultiplexedConnection,
    timeout: Duration,
}

impl RedisCounterStore {
    /// Wraps an existing connection.
    pub fn new(conn: MultiplexedConnection, timeout: Duration) -> Self {
        Self { conn, timeout }
    }

    /// Opens a multiplexed connection using the configured URL and timeout.
    pub async fn connect(config: &RedisConfig) -> Result<Self, CounterStoreError> {
        let timeout = config.timeout();
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| CounterStoreError::Unavailable(e.to_string()))?;

        let conn = tokio::time::timeout(timeout, client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| CounterStoreError::Timeout(timeout))?
            .map_err(|e| CounterStoreError::Unavailable(e.to_string()))?;

        Ok(Self::new(conn, timeout))
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, CounterStoreError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| CounterStoreError::Timeout(self.timeout))?
            .map_err(|e: redis::RedisError| CounterStoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str) -> Result<CounterReading, CounterStoreError> {
        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        pipe.atomic().incr(key, 1_i64).ttl(key);

        // TTL -2: no such key, -1: no expiry.
        let (count, ttl): (i64, i64) = self.bounded(pipe.query_async(&mut conn)).await?;
        Ok(CounterReading {
            count: count.max(0) as u64,
            ttl_secs: (ttl >= 0).then_some(ttl as u64),
        })
    }

    async fn set_expiry(&self, key: &str, seconds: u64) -> Result<(), CounterStoreError> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        self.bounded(conn.expire::<_, ()>(key, seconds)).await
    }
}

impl std::fmt::Debug for RedisCounterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCounterStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
