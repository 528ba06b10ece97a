//! Configuration for the web scraper

use std::time::Duration;

/// Configuration for a site crawl
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Root URL of the site to scrape
    pub base_url: String,

    /// Maximum number of pages to fetch, root included
    pub max_pages: usize,

    /// Politeness delay in milliseconds between requests
    pub delay_ms: u64,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with each request
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_pages: 20,
            delay_ms: 1000,
            timeout_secs: 30,
            user_agent: format!("docent-scraper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for ScraperConfig
#[derive(Debug, Default)]
pub struct ScraperConfigBuilder {
    config: ScraperConfig,
}

impl ScraperConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ScraperConfig::default(),
        }
    }

    /// Set the root URL of the site to scrape
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the maximum number of pages to fetch
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the politeness delay in milliseconds between requests
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent sent with each request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> ScraperConfig {
        self.config
    }
}

impl ScraperConfig {
    /// Create a new builder
    pub fn builder() -> ScraperConfigBuilder {
        ScraperConfigBuilder::new()
    }

    /// Get the politeness delay as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ScraperConfig::builder()
            .base_url("https://example.com")
            .max_pages(5)
            .delay_ms(0)
            .build();

        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.delay(), Duration::from_millis(0));
    }
}
