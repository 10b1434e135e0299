// Cache store for the stats record.
// Wraps the record in a timestamped envelope, enforces the TTL, and degrades every failure to a miss.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::{CACHE_KEY, DEFAULT_TTL};
use crate::error::{LiveError, Result};
use crate::stats::StatsRecord;

use super::storage::SessionStorage;

/// Wrapper for cached data with its write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEnvelope<T> {
    /// When the data was cached.
    pub written_at: DateTime<Utc>,
    /// The cached data.
    pub payload: T,
}

impl<T> CacheEnvelope<T> {
    pub fn new(payload: T, written_at: DateTime<Utc>) -> Self {
        Self {
            written_at,
            payload,
        }
    }

    /// Expired once `now - written_at` is strictly greater than `ttl`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(self.written_at) > ttl
    }
}

/// Best-effort, TTL-bounded cache of one [`StatsRecord`] under a fixed key.
#[derive(Debug)]
pub struct CacheStore<S, C> {
    storage: S,
    clock: C,
    key: String,
    ttl: Duration,
}

impl<S: SessionStorage, C: Clock> CacheStore<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            key: CACHE_KEY.to_string(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached record if present, parseable, and within the TTL.
    ///
    /// A stale envelope is removed. Storage and parse failures are logged
    /// and reported as a miss.
    pub fn read(&mut self) -> Option<StatsRecord> {
        match self.read_envelope::<StatsRecord>() {
            Ok(record) => record,
            Err(e) => {
                debug!(key = %self.key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Store `record` stamped with the current time. Failures are logged and dropped.
    pub fn write(&mut self, record: &StatsRecord) {
        if let Err(e) = self.write_envelope(record) {
            warn!(key = %self.key, error = %e, "cache write failed, continuing without cache");
        }
    }

    fn read_envelope<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            debug!(key = %self.key, "cache miss");
            return Ok(None);
        };

        let envelope: CacheEnvelope<T> =
            serde_json::from_str(&raw).map_err(LiveError::CacheCorrupt)?;

        let now = self.clock.now();
        if envelope.is_expired(self.ttl, now) {
            debug!(
                key = %self.key,
                written_at = %envelope.written_at,
                "evicting stale cache entry"
            );
            self.storage.remove_item(&self.key)?;
            return Ok(None);
        }

        debug!(key = %self.key, written_at = %envelope.written_at, "cache hit");
        Ok(Some(envelope.payload))
    }

    fn write_envelope<T: Serialize>(&mut self, payload: &T) -> Result<()> {
        let envelope = CacheEnvelope::new(payload, self.clock.now());
        let json = serde_json::to_string(&envelope).map_err(LiveError::CacheCorrupt)?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }
}
