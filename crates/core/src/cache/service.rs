use std::sync::Arc;

use log::{debug, warn};

use super::ttl_cache::TtlCache;
use crate::aggregator::SnapshotAggregator;
use crate::clock::Clock;
use crate::config::{CacheConfig, MarketConfig};
use crate::errors::{Error, Result};
use crate::snapshot::merge::merge_quote_patch;
use crate::snapshot::model::{LiveQuotes, MarketSnapshot};

/// Read API over the two cache tiers.
///
/// The slow tier holds full snapshots; the fast tier holds live quote
/// patches. A live snapshot is the latest full snapshot with the latest
/// patch merged in, so history is never re-fetched to refresh prices.
pub struct MarketDataService {
    aggregator: Arc<SnapshotAggregator>,
    full: TtlCache<MarketSnapshot>,
    live: TtlCache<LiveQuotes>,
}

impl MarketDataService {
    pub fn new(aggregator: SnapshotAggregator, clock: Arc<dyn Clock>, cache: CacheConfig) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            full: TtlCache::new(cache.full_ttl, clock.clone()),
            live: TtlCache::new(cache.live_ttl, clock),
        }
    }

    pub fn config(&self) -> &MarketConfig {
        self.aggregator.config()
    }

    /// Full snapshot from the slow tier.
    ///
    /// On an upstream outage the last good snapshot is served, however old.
    /// Without one the outage surfaces as [`Error::DataUnavailable`].
    pub async fn get_full_snapshot(&self) -> Result<MarketSnapshot> {
        let result = self
            .full
            .get_or_refresh(|| self.aggregator.aggregate())
            .await;
        serve_stale_on_outage(result, &self.full, "full snapshot")
    }

    /// Latest quote patch from the fast tier.
    pub async fn get_live_quotes(&self) -> Result<LiveQuotes> {
        let result = self
            .live
            .get_or_refresh(|| self.aggregator.fetch_live_quotes())
            .await;
        serve_stale_on_outage(result, &self.live, "live quotes")
    }

    /// Full snapshot with the latest live quotes merged in.
    ///
    /// When no live quotes can be had, or the only patch on hand predates the
    /// full snapshot, the full snapshot is returned as is.
    pub async fn get_live_snapshot(&self) -> Result<MarketSnapshot> {
        let full = self.get_full_snapshot().await?;
        match self.get_live_quotes().await {
            Ok(patch) if patch.generated_at < full.generated_at => {
                debug!(
                    "Live quotes from {} predate full snapshot from {}; serving it unpatched",
                    patch.generated_at, full.generated_at
                );
                Ok(full)
            }
            Ok(patch) => Ok(merge_quote_patch(&full, &patch, self.config())),
            Err(e) if e.is_outage() => {
                warn!("Serving unpatched full snapshot: {}", e);
                Ok(full)
            }
            Err(e) => Err(e),
        }
    }
}

fn serve_stale_on_outage<T: Clone>(
    result: Result<T>,
    cache: &TtlCache<T>,
    tier: &str,
) -> Result<T> {
    match result {
        Ok(value) => {
            debug!("Serving {}", tier);
            Ok(value)
        }
        Err(e) if e.is_outage() => match cache.peek() {
            Some(entry) => {
                warn!(
                    "Refreshing {} failed ({}); serving entry from {}",
                    tier, e, entry.produced_at
                );
                Ok(entry.value)
            }
            None => Err(Error::DataUnavailable(format!("{}: {}", tier, e))),
        },
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::{IndexConfig, SectorConfig};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use marketpulse_market_data::{
        ChartProvider, ChartRange, ChartResponse, HeadlineProvider, MarketDataError,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;

    const DAY: i64 = 86_400;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 3, 20, 0, 0).unwrap()
    }

    fn body(price: f64, previous: f64) -> String {
        let t = start().timestamp();
        format!(
            r#"{{"chart":{{"result":[{{"meta":{{"regularMarketPrice":{},"chartPreviousClose":{}}},"timestamp":[{},{}],"indicators":{{"quote":[{{"close":[{},{}]}}]}}}}]}}}}"#,
            price,
            previous,
            t - 2 * DAY,
            t - DAY,
            previous,
            previous
        )
    }

    /// Upstream whose prices and availability can be changed between calls.
    #[derive(Clone, Default)]
    struct ScriptedUpstream {
        prices: Arc<Mutex<HashMap<String, (f64, f64)>>>,
        down: Arc<Mutex<bool>>,
        calls: Arc<Mutex<HashMap<ChartRange, usize>>>,
    }

    impl ScriptedUpstream {
        fn set(&self, symbol: &str, price: f64, previous: f64) {
            self.prices
                .lock()
                .unwrap()
                .insert(symbol.to_string(), (price, previous));
        }

        fn set_down(&self, down: bool) {
            *self.down.lock().unwrap() = down;
        }

        fn calls(&self, range: ChartRange) -> usize {
            self.calls.lock().unwrap().get(&range).copied().unwrap_or(0)
        }
    }

    #[async_trait]
    impl ChartProvider for ScriptedUpstream {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        async fn fetch_chart(
            &self,
            symbol: &str,
            range: ChartRange,
        ) -> std::result::Result<ChartResponse, MarketDataError> {
            *self.calls.lock().unwrap().entry(range).or_insert(0) += 1;
            if *self.down.lock().unwrap() {
                return Err(MarketDataError::Timeout {
                    provider: "SCRIPTED".to_string(),
                });
            }
            let (price, previous) = self
                .prices
                .lock()
                .unwrap()
                .get(symbol)
                .copied()
                .ok_or(MarketDataError::Status {
                    provider: "SCRIPTED".to_string(),
                    symbol: symbol.to_string(),
                    status: 404,
                })?;
            Ok(serde_json::from_str(&body(price, previous)).unwrap())
        }
    }

    #[async_trait]
    impl HeadlineProvider for ScriptedUpstream {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        async fn fetch_headlines(
            &self,
            _symbols: &[String],
        ) -> std::result::Result<String, MarketDataError> {
            Ok("<rss></rss>".to_string())
        }
    }

    fn service(upstream: &ScriptedUpstream, clock: &ManualClock) -> MarketDataService {
        let config = MarketConfig {
            watchlist: vec!["A".into(), "B".into()],
            indices: vec![IndexConfig::new("^GSPC", "S&P 500")],
            sectors: vec![SectorConfig::new("S", ["A", "B"])],
            sma_periods: vec![2],
            ..MarketConfig::default()
        };
        let clock: Arc<dyn Clock> = Arc::new(clock.clone());
        let aggregator = SnapshotAggregator::new(
            Arc::new(upstream.clone()),
            Arc::new(upstream.clone()),
            clock.clone(),
            config,
        );
        MarketDataService::new(aggregator, clock, CacheConfig::default())
    }

    fn upstream() -> ScriptedUpstream {
        let upstream = ScriptedUpstream::default();
        upstream.set("^GSPC", 5000.0, 5000.0);
        upstream.set("A", 100.0, 100.0);
        upstream.set("B", 50.0, 50.0);
        upstream
    }

    #[tokio::test]
    async fn test_full_snapshot_cached_for_ttl() {
        let upstream = upstream();
        let clock = ManualClock::new(start());
        let service = service(&upstream, &clock);

        service.get_full_snapshot().await.unwrap();
        clock.advance(Duration::seconds(299));
        service.get_full_snapshot().await.unwrap();
        assert_eq!(upstream.calls(ChartRange::OneYear), 3);

        clock.advance(Duration::seconds(1));
        service.get_full_snapshot().await.unwrap();
        assert_eq!(upstream.calls(ChartRange::OneYear), 6);
    }

    #[tokio::test]
    async fn test_live_snapshot_patches_prices_without_refetching_history() {
        let upstream = upstream();
        let clock = ManualClock::new(start());
        let service = service(&upstream, &clock);

        let full = service.get_full_snapshot().await.unwrap();
        upstream.set("A", 104.0, 100.0);
        clock.advance(Duration::seconds(30));

        let live = service.get_live_snapshot().await.unwrap();
        assert_eq!(upstream.calls(ChartRange::OneYear), 3);
        assert_eq!(upstream.calls(ChartRange::FiveDays), 3);

        assert_eq!(live.watchlist["A"].price, 104.0);
        assert_eq!(live.watchlist["A"].change_pct, 4.0);
        assert_eq!(live.watchlist["A"].ret_1w, full.watchlist["A"].ret_1w);
        assert_eq!(live.watchlist["A"].smas, full.watchlist["A"].smas);
        assert_eq!(live.movers.len(), 1);
        assert_eq!(live.movers[0].symbol, "A");
        assert_eq!(live.sectors[0].avg_change_pct, 2.0);
        assert_eq!(live.generated_at, clock.now());
    }

    #[tokio::test]
    async fn test_live_quotes_cached_for_ttl() {
        let upstream = upstream();
        let clock = ManualClock::new(start());
        let service = service(&upstream, &clock);

        service.get_live_quotes().await.unwrap();
        clock.advance(Duration::seconds(14));
        service.get_live_quotes().await.unwrap();
        assert_eq!(upstream.calls(ChartRange::FiveDays), 3);

        clock.advance(Duration::seconds(1));
        service.get_live_quotes().await.unwrap();
        assert_eq!(upstream.calls(ChartRange::FiveDays), 6);
    }

    #[tokio::test]
    async fn test_outage_serves_stale_snapshot() {
        let upstream = upstream();
        let clock = ManualClock::new(start());
        let service = service(&upstream, &clock);

        let first = service.get_full_snapshot().await.unwrap();
        upstream.set_down(true);
        clock.advance(Duration::seconds(600));

        let stale = service.get_full_snapshot().await.unwrap();
        assert_eq!(stale, first);
    }

    #[tokio::test]
    async fn test_outage_without_previous_is_unavailable() {
        let upstream = upstream();
        upstream.set_down(true);
        let clock = ManualClock::new(start());
        let service = service(&upstream, &clock);

        let error = service.get_full_snapshot().await.unwrap_err();
        assert!(matches!(error, Error::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_live_outage_falls_back_to_full_snapshot() {
        let upstream = upstream();
        let clock = ManualClock::new(start());
        let service = service(&upstream, &clock);

        let full = service.get_full_snapshot().await.unwrap();
        upstream.set_down(true);
        clock.advance(Duration::seconds(20));

        let live = service.get_live_snapshot().await.unwrap();
        assert_eq!(live, full);
    }

    #[tokio::test]
    async fn test_stale_live_quotes_never_roll_back_newer_full_snapshot() {
        let upstream = upstream();
        let clock = ManualClock::new(start());
        let service = service(&upstream, &clock);

        let first = service.get_live_snapshot().await.unwrap();
        assert_eq!(first.watchlist["A"].price, 100.0);

        clock.advance(Duration::seconds(300));
        upstream.set("A", 110.0, 100.0);
        let full = service.get_full_snapshot().await.unwrap();
        assert_eq!(full.watchlist["A"].price, 110.0);

        upstream.set_down(true);
        let live = service.get_live_snapshot().await.unwrap();
        assert_eq!(live.watchlist["A"].price, 110.0);
        assert_eq!(live.watchlist["A"].change_pct, 10.0);
        assert_eq!(live.movers.len(), 1);
        assert_eq!(live.generated_at, full.generated_at);
        assert_eq!(live, full);
    }
}
