use std::sync::Arc;

use marketpulse_core::{
    CacheConfig, Clock, MarketConfig, MarketDataService, SnapshotAggregator, SystemClock,
};
use marketpulse_market_data::YahooProvider;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("MP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn market_config(config: &Config) -> anyhow::Result<MarketConfig> {
    let market = MarketConfig::default()
        .with_batch_size(config.batch_size)
        .with_market_tz(config.market_tz);
    market.validate()?;
    Ok(market)
}

pub fn build_service(config: &Config) -> anyhow::Result<Arc<MarketDataService>> {
    let market = market_config(config)?;
    tracing::info!(
        "Tracking {} watchlist symbols, {} indices, {} sectors (batch size {})",
        market.watchlist.len(),
        market.indices.len(),
        market.sectors.len(),
        market.batch_size
    );

    let provider = YahooProvider::new(config.request_timeout)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let aggregator = SnapshotAggregator::new(
        Arc::new(provider.clone()),
        Arc::new(provider),
        clock.clone(),
        market,
    );

    let cache = CacheConfig {
        full_ttl: config.full_ttl,
        live_ttl: config.live_ttl,
    };
    Ok(Arc::new(MarketDataService::new(aggregator, clock, cache)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_config_rejects_zero_batch() {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.batch_size = 0;
        assert!(market_config(&config).is_err());
    }

    #[test]
    fn test_build_service_uses_configured_universe() {
        let config = Config::from_lookup(|_| None).unwrap();
        let service = build_service(&config).unwrap();
        assert_eq!(service.config().watchlist.len(), 38);
        assert_eq!(service.config().batch_size, 20);
    }
}
