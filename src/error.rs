//! Error types for the docent crate

use crate::scraper::ScrapeError;
use thiserror::Error;

/// Result type for docent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for docent operations
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Web scraping or page storage error
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_errors_convert() {
        let err: Error = ScrapeError::HtmlParse("bad selector".to_string()).into();
        assert!(matches!(err, Error::Scrape(_)));
    }
}
