//! Default market universe and engine tunables.

use std::time::Duration;

use chrono_tz::Tz;

/// Default watchlist, grouped by sector.
pub const DEFAULT_WATCHLIST: &[&str] = &[
    // Hyperscalers
    "AMZN", "GOOGL", "META", "MSFT", "ORCL",
    // Chips
    "AMD", "ARM", "AVGO", "INTC", "MRVL", "NVDA",
    // Memory
    "MU", "SNDK", "STX", "WDC",
    // Networking
    "ALAB", "CRDO",
    // Optical
    "AAOI", "CIEN", "COHR", "GLW", "LITE", "LUMN",
    // Neoclouds
    "APLD", "CIFR", "CRWV", "IREN", "NBIS",
    // Servers
    "DELL", "SMCI",
    // Power
    "BE", "CEG", "IESC", "OKLO", "PSIX", "SMR", "VRT", "VST",
];

/// Default indices as (provider symbol, display name).
pub const DEFAULT_INDICES: &[(&str, &str)] = &[
    ("^GSPC", "S&P 500"),
    ("^DJI", "Dow Jones"),
    ("^IXIC", "Nasdaq"),
    ("BTC-USD", "Bitcoin"),
];

/// Default sector grouping as (sector name, member symbols).
pub const DEFAULT_SECTORS: &[(&str, &[&str])] = &[
    ("HYPERSCALERS", &["AMZN", "GOOGL", "META", "MSFT", "ORCL"]),
    ("CHIPS", &["AMD", "ARM", "AVGO", "INTC", "MRVL", "NVDA"]),
    ("MEMORY", &["MU", "SNDK", "STX", "WDC"]),
    ("NETWORKING", &["ALAB", "CRDO"]),
    ("OPTICAL", &["AAOI", "CIEN", "COHR", "GLW", "LITE", "LUMN"]),
    ("NEOCLOUDS", &["APLD", "CIFR", "CRWV", "IREN", "NBIS"]),
    ("SERVERS", &["DELL", "SMCI"]),
    ("POWER", &["BE", "CEG", "IESC", "OKLO", "PSIX", "SMR", "VRT", "VST"]),
];

/// Moving-average windows, in trading days.
pub const DEFAULT_SMA_PERIODS: &[usize] = &[5, 10, 20, 50, 100, 200];

/// Number of upstream requests issued together before awaiting the batch.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Minimum absolute daily change, in percent, for a watchlist symbol to be a mover.
pub const MOVER_THRESHOLD_PCT: f64 = 3.0;

/// Sector averages within this band, in percent, are reported as flat.
pub const FLAT_SECTOR_BAND_PCT: f64 = 0.1;

/// News items older than this, relative to fetch time, are dropped.
pub const NEWS_MAX_AGE_HOURS: i64 = 24;

/// Full snapshot freshness: history changes slowly.
pub const DEFAULT_FULL_SNAPSHOT_TTL: Duration = Duration::from_secs(300);

/// Live quote freshness.
pub const DEFAULT_LIVE_QUOTES_TTL: Duration = Duration::from_secs(15);

/// Calendar-relative lookbacks (1 month, year-to-date) are evaluated in this zone.
pub const DEFAULT_MARKET_TZ: Tz = chrono_tz::America::New_York;
