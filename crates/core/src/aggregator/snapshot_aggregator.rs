use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};

use marketpulse_market_data::{
    parse_chart, parse_quote_meta, ChartProvider, ChartRange, HeadlineProvider, MarketDataError,
    ParsedChart,
};

use super::batch::{fetch_in_batches, BatchReport};
use crate::clock::Clock;
use crate::config::MarketConfig;
use crate::errors::{AggregationError, Result};
use crate::indicators::IndicatorCalculator;
use crate::errors::NewsFeedError;
use crate::news::{extract_news, NewsExtraction};
use crate::snapshot::aggregates::derive_aggregates;
use crate::snapshot::model::{LiveQuotes, MarketSnapshot, NewsItem, QuotePatch};

/// Builds full snapshots and live quote patches from the upstream providers.
pub struct SnapshotAggregator {
    charts: Arc<dyn ChartProvider>,
    headlines: Arc<dyn HeadlineProvider>,
    clock: Arc<dyn Clock>,
    config: MarketConfig,
    calculator: IndicatorCalculator,
}

impl SnapshotAggregator {
    pub fn new(
        charts: Arc<dyn ChartProvider>,
        headlines: Arc<dyn HeadlineProvider>,
        clock: Arc<dyn Clock>,
        config: MarketConfig,
    ) -> Self {
        let calculator = IndicatorCalculator::from_config(&config);
        Self {
            charts,
            headlines,
            clock,
            config,
            calculator,
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Runs a full aggregation pass.
    ///
    /// Symbols that fail to fetch or parse are left out. The pass only fails
    /// when neither an index nor a watchlist symbol resolved. News is fetched
    /// alongside the charts and never fails the pass.
    pub async fn aggregate(&self) -> Result<MarketSnapshot> {
        let now = self.clock.now();
        let symbols = self.config.all_symbols();

        let (report, news) = futures::future::join(
            self.fetch_charts(&symbols),
            self.fetch_news(now),
        )
        .await;

        info!("Full aggregation: {}", report.summary());

        if report.is_empty() {
            return Err(AggregationError::NoData {
                omitted: report.omitted_count(),
            }
            .into());
        }

        let mut indices = BTreeMap::new();
        for index in &self.config.indices {
            if let Some(parsed) = report.get(&index.symbol) {
                indices.insert(
                    index.display_symbol(),
                    self.calculator.index_snapshot(parsed, &index.name),
                );
            }
        }

        let mut watchlist = BTreeMap::new();
        for symbol in &self.config.watchlist {
            if let Some(parsed) = report.get(symbol) {
                watchlist.insert(symbol.clone(), self.calculator.ticker_snapshot(parsed, now));
            }
        }

        let derived = derive_aggregates(&self.config.watchlist, &watchlist, &self.config.sectors);

        Ok(MarketSnapshot {
            generated_at: now,
            indices,
            watchlist,
            movers: derived.movers,
            sectors: derived.sectors,
            news,
        })
    }

    /// Fetches live prices only, using the short chart range and metadata.
    pub async fn fetch_live_quotes(&self) -> Result<LiveQuotes> {
        let now = self.clock.now();
        let symbols = self.config.all_symbols();

        let report: BatchReport<QuotePatch> =
            fetch_in_batches(&symbols, self.config.batch_size, |symbol| async move {
                let response = self.charts.fetch_chart(&symbol, ChartRange::FiveDays).await?;
                let meta = parse_quote_meta(&response)?;
                Ok::<_, MarketDataError>(QuotePatch::from(meta))
            })
            .await;

        info!("Live quotes: {}", report.summary());

        if report.is_empty() {
            return Err(AggregationError::NoData {
                omitted: report.omitted_count(),
            }
            .into());
        }

        let indices = self
            .config
            .indices
            .iter()
            .filter_map(|index| {
                report
                    .get(&index.symbol)
                    .map(|patch| (index.display_symbol(), *patch))
            })
            .collect();
        let watchlist = self
            .config
            .watchlist
            .iter()
            .filter_map(|symbol| report.get(symbol).map(|patch| (symbol.clone(), *patch)))
            .collect();

        Ok(LiveQuotes {
            generated_at: now,
            indices,
            watchlist,
        })
    }

    async fn fetch_charts(&self, symbols: &[String]) -> BatchReport<ParsedChart> {
        fetch_in_batches(symbols, self.config.batch_size, |symbol| async move {
            let response = self.charts.fetch_chart(&symbol, ChartRange::OneYear).await?;
            Ok::<_, MarketDataError>(parse_chart(&response)?)
        })
        .await
    }

    async fn fetch_news(&self, now: DateTime<Utc>) -> Vec<NewsItem> {
        let extraction = self.extract_headlines(now).await;
        if let Some(error) = extraction.error {
            warn!("News from {} unavailable: {}", self.headlines.id(), error);
            return Vec::new();
        }
        extraction.items
    }

    async fn extract_headlines(&self, now: DateTime<Utc>) -> NewsExtraction {
        match self.headlines.fetch_headlines(&self.config.watchlist).await {
            Ok(feed) => extract_news(&feed, &self.config.watchlist, now),
            Err(e) => NewsExtraction::failed(NewsFeedError::Transport(e.to_string())),
        }
    }
}
