//! # Web Scraper Module
//!
//! This module gathers text content from one configured website: the root
//! page plus its direct same-site links, fetched once each. It is the second
//! content source of the chatbot, next to uploaded files.
//!
//! ## Key Components
//!
//! - `ScraperConfig`: Configuration (base URL, page limit, politeness delay)
//! - `crawl_site`: Fetches the root and its direct links, one pass, no
//!   recursion beyond that
//! - `extract_page`: Strips a fetched page down to title and readable text
//! - `storage`: Persists scraped pages as flat text files
//!
//! ## Failure Semantics
//!
//! A fetch or parse failure on any one page is logged and skipped; the crawl
//! carries on with the remaining links. Nothing is retried. Only an
//! unreachable root page fails the crawl as a whole, since there is nothing
//! to discover without it.

mod config;
mod crawl;
mod error;
mod extract;
pub mod storage;

pub use config::{ScraperConfig, ScraperConfigBuilder};
pub use crawl::crawl_site;
pub use error::ScrapeError;
pub use extract::{extract_links, extract_page};

use serde::{Deserialize, Serialize};

/// A scraped page reduced to readable text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// Normalized URL of the page
    pub url: String,

    /// Page title, or the URL when the page has none
    pub title: String,

    /// Markup-free text content, one block per line group
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraped_page_roundtrip() {
        let page = ScrapedPage {
            url: "https://example.com/events".to_string(),
            title: "Events".to_string(),
            text: "Spring concert on April 12.".to_string(),
        };

        let json = serde_json::to_string(&page).unwrap();
        let back: ScrapedPage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.url, page.url);
        assert_eq!(back.title, page.title);
    }
}
