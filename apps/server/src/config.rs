use std::time::Duration;

use anyhow::Context;
use chrono_tz::Tz;
use marketpulse_core::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_FULL_SNAPSHOT_TTL, DEFAULT_LIVE_QUOTES_TTL, DEFAULT_MARKET_TZ,
};

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub struct Config {
    pub batch_size: usize,
    pub full_ttl: Duration,
    pub live_ttl: Duration,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub market_tz: Tz,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unparseable numbers fall
    /// back to their defaults; an unknown time zone is an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        let batch_size = number("MP_BATCH_SIZE", DEFAULT_BATCH_SIZE as u64) as usize;
        let full_ttl_secs = number("MP_FULL_TTL_SECS", DEFAULT_FULL_SNAPSHOT_TTL.as_secs());
        let live_ttl_secs = number("MP_LIVE_TTL_SECS", DEFAULT_LIVE_QUOTES_TTL.as_secs());
        let refresh_secs = number("MP_REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS);
        let timeout_ms = number("MP_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS);

        let market_tz = match lookup("MP_MARKET_TZ") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid MP_MARKET_TZ '{}'", name))?,
            None => DEFAULT_MARKET_TZ,
        };

        Ok(Self {
            batch_size,
            full_ttl: Duration::from_secs(full_ttl_secs),
            live_ttl: Duration::from_secs(live_ttl_secs),
            refresh_interval: Duration::from_secs(refresh_secs.max(1)),
            request_timeout: Duration::from_millis(timeout_ms),
            market_tz,
        })
    }
}
