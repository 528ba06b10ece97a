//! Error types for the scraper module

use thiserror::Error;

/// Error type for scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// HTML parsing error
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Filesystem error while saving or loading pages
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
