//! Background scheduler for periodic snapshot refresh.
//!
//! Each tick reads the live snapshot, which refreshes whichever cache tier has
//! expired, and logs a one-line summary plus the sector commentary.

use std::sync::Arc;

use marketpulse_core::snapshot::{summarize_sectors, MarketCommentary};
use marketpulse_core::{MarketDataService, MarketSnapshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Starts the background refresh loop. The first tick runs immediately.
pub fn start_refresh_scheduler(
    service: Arc<MarketDataService>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Refresh scheduler started ({}s interval)", every.as_secs());

        let mut refresh_interval = interval(every);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            refresh_interval.tick().await;
            run_scheduled_refresh(&service).await;
        }
    })
}

/// Runs a single refresh and logs the outcome.
async fn run_scheduled_refresh(service: &MarketDataService) {
    match service.get_live_snapshot().await {
        Ok(snapshot) => {
            info!("{}", snapshot_summary(&snapshot));
            info!("{}", commentary_line(&summarize_sectors(&snapshot.sectors)));
            match serde_json::to_string(&snapshot) {
                Ok(json) => debug!("Snapshot: {}", json),
                Err(e) => warn!("Failed to serialize snapshot: {}", e),
            }
        }
        Err(e) if e.is_outage() => warn!("Market data unavailable: {}", e),
        Err(e) => warn!("Scheduled refresh failed: {}", e),
    }
}

fn snapshot_summary(snapshot: &MarketSnapshot) -> String {
    let movers = snapshot
        .movers
        .iter()
        .take(5)
        .map(|m| format!("{} {:+.2}%", m.symbol, m.change_pct))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Snapshot at {}: {} indices, {} watchlist symbols, {} movers [{}], {} headlines",
        snapshot.generated_at.to_rfc3339(),
        snapshot.indices.len(),
        snapshot.watchlist.len(),
        snapshot.movers.len(),
        movers,
        snapshot.news.len()
    )
}

fn commentary_line(commentary: &MarketCommentary) -> String {
    if commentary.all_flat {
        return "Sectors flat across the board".to_string();
    }

    let names = |moves: &[marketpulse_core::snapshot::SectorMove]| {
        moves
            .iter()
            .map(|m| format!("{} ({:+.2}%)", m.name, m.avg_change_pct))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut parts = Vec::new();
    if !commentary.leading.is_empty() {
        parts.push(format!("leading: {}", names(&commentary.leading)));
    }
    if !commentary.lagging.is_empty() {
        parts.push(format!("lagging: {}", names(&commentary.lagging)));
    }
    if let (Some(top), Some(bottom)) = (&commentary.top_standout, &commentary.bottom_standout) {
        parts.push(format!(
            "standouts: {} {:+.2}% / {} {:+.2}%",
            top.symbol, top.change_pct, bottom.symbol, bottom.change_pct
        ));
    }
    if parts.is_empty() {
        "No sector data".to_string()
    } else {
        format!("Sectors {}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketpulse_core::snapshot::{SectorMove, Standout};

    #[test]
    fn test_commentary_line() {
        let commentary = MarketCommentary {
            leading: vec![SectorMove {
                name: "CHIPS".to_string(),
                avg_change_pct: 2.4,
            }],
            lagging: vec![],
            all_flat: false,
            top_standout: Some(Standout {
                symbol: "NVDA".to_string(),
                change_pct: 4.1,
            }),
            bottom_standout: Some(Standout {
                symbol: "OKLO".to_string(),
                change_pct: -6.0,
            }),
        };
        assert_eq!(
            commentary_line(&commentary),
            "Sectors leading: CHIPS (+2.40%); standouts: NVDA +4.10% / OKLO -6.00%"
        );
    }

    #[test]
    fn test_flat_and_empty_commentary() {
        let flat = MarketCommentary {
            all_flat: true,
            ..MarketCommentary::default()
        };
        assert_eq!(commentary_line(&flat), "Sectors flat across the board");
        assert_eq!(commentary_line(&MarketCommentary::default()), "No sector data");
    }
}
