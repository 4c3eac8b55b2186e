//! RSS headline extraction.
//!
//! The feed is scanned with a handful of patterns rather than a full XML
//! parser: only `<item>` blocks and their `title`, `link` and `pubDate`
//! children are read. Anything that cannot be read is skipped, never raised.

use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::constants::NEWS_MAX_AGE_HOURS;
use crate::errors::NewsFeedError;
use crate::snapshot::model::NewsItem;

lazy_static! {
    static ref ITEM_REGEX: Regex =
        Regex::new(r"(?s)<item>(.*?)</item>").expect("Invalid regex pattern");
    static ref CDATA_TITLE_REGEX: Regex =
        Regex::new(r"(?s)<title><!\[CDATA\[(.*?)\]\]></title>").expect("Invalid regex pattern");
    static ref TITLE_REGEX: Regex =
        Regex::new(r"(?s)<title>(.*?)</title>").expect("Invalid regex pattern");
    static ref LINK_REGEX: Regex =
        Regex::new(r"(?s)<link>(.*?)</link>").expect("Invalid regex pattern");
    static ref PUB_DATE_REGEX: Regex =
        Regex::new(r"(?s)<pubDate>(.*?)</pubDate>").expect("Invalid regex pattern");
}

/// Result of one extraction pass.
///
/// `error` is set when the feed yielded nothing usable for a structural
/// reason; `items` is then empty. Items dropped for age or missing fields are
/// not errors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewsExtraction {
    pub items: Vec<NewsItem>,
    pub error: Option<NewsFeedError>,
}

impl NewsExtraction {
    pub fn failed(error: NewsFeedError) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error),
        }
    }
}

/// Extracts recent headlines from raw feed text and tags them with the
/// watchlist symbols they mention.
///
/// Items published more than 24 hours before `now` are dropped; an item
/// exactly 24 hours old is kept. The result is sorted newest first.
pub fn extract_news(feed: &str, watchlist: &[String], now: DateTime<Utc>) -> NewsExtraction {
    let matchers = match symbol_matchers(watchlist) {
        Ok(matchers) => matchers,
        Err(e) => return NewsExtraction::failed(e),
    };

    let blocks: Vec<&str> = ITEM_REGEX
        .captures_iter(feed)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    if blocks.is_empty() {
        return NewsExtraction::failed(NewsFeedError::NoItems);
    }

    let max_age = Duration::hours(NEWS_MAX_AGE_HOURS);
    let mut items: Vec<NewsItem> = blocks
        .into_iter()
        .filter_map(parse_item)
        .filter(|item| now - item.published_at <= max_age)
        .map(|mut item| {
            item.tickers = matchers
                .iter()
                .filter(|(_, re)| re.is_match(&item.title))
                .map(|(symbol, _)| symbol.clone())
                .collect();
            item
        })
        .collect();

    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    NewsExtraction { items, error: None }
}

/// One case-insensitive whole-word pattern per symbol.
fn symbol_matchers(watchlist: &[String]) -> Result<Vec<(String, Regex)>, NewsFeedError> {
    watchlist
        .iter()
        .map(|symbol| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(symbol));
            Regex::new(&pattern)
                .map(|re| (symbol.clone(), re))
                .map_err(|e| NewsFeedError::Pattern(e.to_string()))
        })
        .collect()
}

fn parse_item(block: &str) -> Option<NewsItem> {
    let title = CDATA_TITLE_REGEX
        .captures(block)
        .or_else(|| TITLE_REGEX.captures(block))
        .and_then(|c| c.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
        .filter(|t| !t.is_empty())?;
    let link = LINK_REGEX
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
        .unwrap_or_default();
    let raw_date = PUB_DATE_REGEX
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|d| !d.is_empty())?;

    let published_at = match DateTime::parse_from_rfc2822(raw_date) {
        Ok(date) => date.with_timezone(&Utc),
        Err(e) => {
            debug!("Skipping news item with unreadable date '{}': {}", raw_date, e);
            return None;
        }
    };

    Some(NewsItem {
        title,
        link,
        published_at,
        tickers: Vec::new(),
    })
}

/// Decodes the five predefined XML entities. `&amp;` goes last so an escaped
/// entity such as `&amp;lt;` decodes to `&lt;`, not `<`.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
