//! Batched fan-out over upstream symbols.
//!
//! Symbols are fetched in fixed-size batches. Every request in a batch is
//! issued together and the whole batch resolves before the next one starts,
//! which bounds the number of requests in flight. A failed symbol never
//! cancels its siblings; it is recorded as an omission and the pass goes on.

use std::collections::BTreeMap;
use std::future::Future;

use log::debug;

use marketpulse_market_data::{MarketDataError, OmissionClass, ParseError};

/// Why a symbol was left out of a pass.
#[derive(Clone, Debug, PartialEq)]
pub enum OmissionReason {
    Transport(String),
    Parse(ParseError),
}

impl OmissionReason {
    pub fn class(&self) -> OmissionClass {
        match self {
            Self::Transport(_) => OmissionClass::Transport,
            Self::Parse(_) => OmissionClass::Parse,
        }
    }
}

impl From<MarketDataError> for OmissionReason {
    fn from(error: MarketDataError) -> Self {
        match error {
            MarketDataError::Parse(e) => Self::Parse(e),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl std::fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport: {}", message),
            Self::Parse(e) => write!(f, "parse: {}", e),
        }
    }
}

/// Tagged result of fetching one symbol.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome<T> {
    Resolved { symbol: String, value: T },
    Omitted { symbol: String, reason: OmissionReason },
}

impl<T> FetchOutcome<T> {
    pub fn from_result(symbol: String, result: Result<T, MarketDataError>) -> Self {
        match result {
            Ok(value) => Self::Resolved { symbol, value },
            Err(e) => Self::Omitted {
                symbol,
                reason: e.into(),
            },
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Resolved { symbol, .. } | Self::Omitted { symbol, .. } => symbol,
        }
    }
}

/// Everything one batched pass produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchReport<T> {
    resolved: BTreeMap<String, T>,
    omitted: Vec<(String, OmissionReason)>,
    batches: usize,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            resolved: BTreeMap::new(),
            omitted: Vec::new(),
            batches: 0,
        }
    }
}

impl<T> BatchReport<T> {
    pub fn record(&mut self, outcome: FetchOutcome<T>) {
        match outcome {
            FetchOutcome::Resolved { symbol, value } => {
                self.resolved.entry(symbol).or_insert(value);
            }
            FetchOutcome::Omitted { symbol, reason } => {
                debug!("Omitting {} ({})", symbol, reason);
                self.omitted.push((symbol, reason));
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&T> {
        self.resolved.get(symbol)
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn omitted(&self) -> &[(String, OmissionReason)] {
        &self.omitted
    }

    pub fn omitted_count(&self) -> usize {
        self.omitted.len()
    }

    /// Number of omissions of the given class.
    pub fn omitted_by(&self, class: OmissionClass) -> usize {
        self.omitted
            .iter()
            .filter(|(_, reason)| reason.class() == class)
            .count()
    }

    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "{} resolved, {} omitted ({} transport, {} parse) in {} batches",
            self.resolved_count(),
            self.omitted_count(),
            self.omitted_by(OmissionClass::Transport),
            self.omitted_by(OmissionClass::Parse),
            self.batches
        )
    }
}

/// Runs `fetch` for every symbol, `batch_size` at a time.
///
/// A `batch_size` of zero is treated as one.
pub async fn fetch_in_batches<T, F, Fut>(
    symbols: &[String],
    batch_size: usize,
    fetch: F,
) -> BatchReport<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, MarketDataError>>,
{
    let mut report = BatchReport::default();

    for chunk in symbols.chunks(batch_size.max(1)) {
        let futures: Vec<_> = chunk
            .iter()
            .map(|symbol| {
                let symbol = symbol.clone();
                let request = fetch(symbol.clone());
                async move { FetchOutcome::from_result(symbol, request.await) }
            })
            .collect();

        let outcomes = futures::future::join_all(futures).await;
        report.batches += 1;

        for outcome in outcomes {
            report.record(outcome);
        }
    }

    report
}
