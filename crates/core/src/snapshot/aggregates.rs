//! Cross-sectional aggregates derived from a watchlist.
//!
//! [`derive_aggregates`] is the only place movers and sector performance are
//! computed. Both the cold aggregation path and the quote-patch merge call it,
//! so the two can never disagree.

use std::collections::BTreeMap;

use crate::config::SectorConfig;
use crate::constants::MOVER_THRESHOLD_PCT;
use crate::utils::round2;

use super::model::{Direction, MoverEntry, SectorAggregate, TickerSnapshot};

/// Movers and sector performance for one watchlist state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedAggregates {
    pub movers: Vec<MoverEntry>,
    pub sectors: Vec<SectorAggregate>,
}

/// Recomputes every derived aggregate from scratch.
///
/// `order` is the configured watchlist order; ties are resolved by it.
pub fn derive_aggregates(
    order: &[String],
    watchlist: &BTreeMap<String, TickerSnapshot>,
    sectors: &[SectorConfig],
) -> DerivedAggregates {
    DerivedAggregates {
        movers: compute_movers(order, watchlist),
        sectors: compute_sector_performance(watchlist, sectors),
    }
}

/// Watchlist symbols with `|change_pct| >= 3`, largest magnitude first.
pub fn compute_movers(
    order: &[String],
    watchlist: &BTreeMap<String, TickerSnapshot>,
) -> Vec<MoverEntry> {
    let mut movers: Vec<MoverEntry> = order
        .iter()
        .filter_map(|symbol| watchlist.get(symbol).map(|t| (symbol, t)))
        .filter(|(_, t)| t.change_pct.abs() >= MOVER_THRESHOLD_PCT)
        .map(|(symbol, t)| MoverEntry {
            symbol: symbol.clone(),
            price: t.price,
            change_pct: t.change_pct,
            direction: Direction::from_change(t.change_pct),
        })
        .collect();

    movers.sort_by(|a, b| b.change_pct.abs().total_cmp(&a.change_pct.abs()));
    movers
}

/// Per-sector average change with best and worst member, best sector first.
///
/// A sector with no resolved members is kept as a zeroed entry.
pub fn compute_sector_performance(
    watchlist: &BTreeMap<String, TickerSnapshot>,
    sectors: &[SectorConfig],
) -> Vec<SectorAggregate> {
    let mut result: Vec<SectorAggregate> = sectors
        .iter()
        .map(|sector| sector_aggregate(sector, watchlist))
        .collect();

    result.sort_by(|a, b| b.avg_change_pct.total_cmp(&a.avg_change_pct));
    result
}

fn sector_aggregate(
    sector: &SectorConfig,
    watchlist: &BTreeMap<String, TickerSnapshot>,
) -> SectorAggregate {
    let mut members: Vec<(&str, f64)> = sector
        .tickers
        .iter()
        .filter_map(|symbol| watchlist.get(symbol).map(|t| (symbol.as_str(), t.change_pct)))
        .collect();

    if members.is_empty() {
        return SectorAggregate::empty(&sector.name);
    }

    let avg = members.iter().map(|(_, pct)| pct).sum::<f64>() / members.len() as f64;

    // Stable: among equal changes, configuration order is preserved.
    members.sort_by(|a, b| b.1.total_cmp(&a.1));
    let (best_name, best_change_pct) = members[0];
    let (worst_name, worst_change_pct) = members[members.len() - 1];

    SectorAggregate {
        name: sector.name.clone(),
        avg_change_pct: round2(avg),
        best_name: best_name.to_string(),
        best_change_pct,
        worst_name: worst_name.to_string(),
        worst_change_pct,
    }
}
