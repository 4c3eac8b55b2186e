//! A single-slot cache with time-based expiry.
//!
//! Reads take a short `std::sync::RwLock`. Refreshes are serialized by a
//! `tokio::sync::Mutex`, so concurrent callers that find the slot expired
//! wait for one producer instead of each starting their own.

use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::Clock;

/// A cached value and the instant its refresh started.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry<T> {
    pub value: T,
    pub produced_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// True while `now - produced_at < ttl`. An entry stamped in the future
    /// (the clock moved backwards) counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.produced_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}

pub struct TtlCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: RwLock<Option<CacheEntry<T>>>,
    refresh: tokio::sync::Mutex<()>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entry: RwLock::new(None),
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The current entry regardless of age.
    pub fn peek(&self) -> Option<CacheEntry<T>> {
        self.entry.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Drops the current entry; the next read refreshes.
    pub fn invalidate(&self) {
        *self.entry.write().unwrap_or_else(|p| p.into_inner()) = None;
    }

    fn fresh_value(&self) -> Option<T> {
        let now = self.clock.now();
        self.entry
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .as_ref()
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Returns the cached value while fresh; otherwise runs `producer` once and
    /// stores its value.
    ///
    /// When the producer fails the previous entry stays in place and the error
    /// is returned to the caller.
    pub async fn get_or_refresh<F, Fut, E>(&self, producer: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.fresh_value() {
            return Ok(value);
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(value) = self.fresh_value() {
            return Ok(value);
        }

        let started_at = self.clock.now();
        let value = producer().await?;

        *self.entry.write().unwrap_or_else(|p| p.into_inner()) = Some(CacheEntry {
            value: value.clone(),
            produced_at: started_at,
        });
        Ok(value)
    }
}
