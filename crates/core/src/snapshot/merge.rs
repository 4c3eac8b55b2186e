//! Incremental merge of live quotes into a full snapshot.

use crate::config::MarketConfig;

use super::aggregates::derive_aggregates;
use super::model::{LiveQuotes, MarketSnapshot};

/// Patches live prices into `full` and recomputes every derived aggregate.
///
/// Only `price`, `change` and `change_pct` change, and only for symbols
/// present in both the snapshot and the patch. Returns, moving averages and
/// news are carried over untouched; no symbol is inserted or removed. Movers
/// and sectors are rebuilt from the patched watchlist, never carried over.
///
/// Pure: the same inputs always produce the same snapshot.
pub fn merge_quote_patch(
    full: &MarketSnapshot,
    patch: &LiveQuotes,
    config: &MarketConfig,
) -> MarketSnapshot {
    let mut merged = full.clone();

    for (symbol, index) in merged.indices.iter_mut() {
        if let Some(quote) = patch.indices.get(symbol) {
            index.apply_patch(quote);
        }
    }

    for (symbol, ticker) in merged.watchlist.iter_mut() {
        if let Some(quote) = patch.watchlist.get(symbol) {
            ticker.apply_patch(quote);
        }
    }

    let derived = derive_aggregates(&config.watchlist, &merged.watchlist, &config.sectors);
    merged.movers = derived.movers;
    merged.sectors = derived.sectors;
    merged.generated_at = patch.generated_at;
    merged
}
