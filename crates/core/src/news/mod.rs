//! Headline news for the watchlist.

mod extractor;

pub use extractor::{decode_entities, extract_news, NewsExtraction};
