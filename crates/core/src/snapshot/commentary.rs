//! One-line market commentary derived from sector performance.

use serde::{Deserialize, Serialize};

use crate::constants::FLAT_SECTOR_BAND_PCT;

use super::model::SectorAggregate;

/// A sector name with its average change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorMove {
    pub name: String,
    pub avg_change_pct: f64,
}

/// An individual symbol singled out across all sectors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standout {
    pub symbol: String,
    pub change_pct: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCommentary {
    pub leading: Vec<SectorMove>,
    pub lagging: Vec<SectorMove>,
    pub all_flat: bool,
    pub top_standout: Option<Standout>,
    pub bottom_standout: Option<Standout>,
}

/// Classifies sectors as leading, lagging or flat and picks the strongest and
/// weakest individual names among the sector extremes.
pub fn summarize_sectors(sectors: &[SectorAggregate]) -> MarketCommentary {
    let as_move = |s: &SectorAggregate| SectorMove {
        name: s.name.clone(),
        avg_change_pct: s.avg_change_pct,
    };

    let leading: Vec<SectorMove> = sectors
        .iter()
        .filter(|s| s.avg_change_pct > FLAT_SECTOR_BAND_PCT)
        .map(as_move)
        .collect();
    let lagging: Vec<SectorMove> = sectors
        .iter()
        .filter(|s| s.avg_change_pct < -FLAT_SECTOR_BAND_PCT)
        .map(as_move)
        .collect();
    let all_flat = leading.is_empty() && lagging.is_empty() && !sectors.is_empty();

    let names: Vec<Standout> = sectors
        .iter()
        .filter(|s| !s.best_name.is_empty())
        .flat_map(|s| {
            [
                Standout {
                    symbol: s.best_name.clone(),
                    change_pct: s.best_change_pct,
                },
                Standout {
                    symbol: s.worst_name.clone(),
                    change_pct: s.worst_change_pct,
                },
            ]
        })
        .collect();

    let mut by_desc = names.clone();
    by_desc.sort_by(|a, b| b.change_pct.total_cmp(&a.change_pct));
    let mut by_asc = names;
    by_asc.sort_by(|a, b| a.change_pct.total_cmp(&b.change_pct));

    let (top_standout, bottom_standout) = match (by_desc.into_iter().next(), by_asc.into_iter().next()) {
        (Some(top), Some(bottom)) if top.symbol != bottom.symbol => (Some(top), Some(bottom)),
        _ => (None, None),
    };

    MarketCommentary {
        leading,
        lagging,
        all_flat,
        top_standout,
        bottom_standout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector(name: &str, avg: f64, best: (&str, f64), worst: (&str, f64)) -> SectorAggregate {
        SectorAggregate {
            name: name.to_string(),
            avg_change_pct: avg,
            best_name: best.0.to_string(),
            best_change_pct: best.1,
            worst_name: worst.0.to_string(),
            worst_change_pct: worst.1,
        }
    }

    #[test]
    fn test_leading_and_lagging() {
        let sectors = vec![
            sector("CHIPS", 2.4, ("NVDA", 4.1), ("INTC", 0.3)),
            sector("MEMORY", 0.05, ("MU", 0.2), ("WDC", -0.1)),
            sector("POWER", -1.7, ("VST", -0.5), ("OKLO", -6.0)),
        ];
        let commentary = summarize_sectors(&sectors);
        assert_eq!(commentary.leading.len(), 1);
        assert_eq!(commentary.leading[0].name, "CHIPS");
        assert_eq!(commentary.lagging[0].name, "POWER");
        assert!(!commentary.all_flat);
        assert_eq!(commentary.top_standout.unwrap().symbol, "NVDA");
        assert_eq!(commentary.bottom_standout.unwrap().symbol, "OKLO");
    }

    #[test]
    fn test_all_flat() {
        let sectors = vec![
            sector("A", 0.1, ("X", 0.1), ("X", 0.1)),
            sector("B", -0.1, ("Y", -0.1), ("Y", -0.1)),
        ];
        let commentary = summarize_sectors(&sectors);
        assert!(commentary.all_flat);
        assert!(commentary.leading.is_empty());
    }

    #[test]
    fn test_no_standouts_for_single_name() {
        let sectors = vec![sector("A", 1.0, ("X", 1.0), ("X", 1.0))];
        let commentary = summarize_sectors(&sectors);
        assert!(commentary.top_standout.is_none());
        assert!(commentary.bottom_standout.is_none());
    }

    #[test]
    fn test_empty_sectors_are_ignored_for_standouts() {
        let sectors = vec![
            SectorAggregate::empty("GONE"),
            sector("A", 1.0, ("X", 2.0), ("Y", 0.0)),
        ];
        let commentary = summarize_sectors(&sectors);
        assert_eq!(commentary.top_standout.unwrap().symbol, "X");
        assert_eq!(commentary.bottom_standout.unwrap().symbol, "Y");
    }

    #[test]
    fn test_no_sectors() {
        assert_eq!(summarize_sectors(&[]), MarketCommentary::default());
    }
}
