//! Configuration for the text processor

/// Configuration for text processing
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Minimum number of characters for a span to be kept
    pub min_span_chars: usize,

    /// Whether to rewrite recognized date fragments to canonical form
    pub normalize_dates: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            min_span_chars: 3,
            normalize_dates: true,
        }
    }
}

/// Builder for ProcessorConfig
#[derive(Debug, Default)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
        }
    }

    /// Set the minimum span length in characters
    pub fn min_span_chars(mut self, min_span_chars: usize) -> Self {
        self.config.min_span_chars = min_span_chars;
        self
    }

    /// Set whether date fragments are rewritten to canonical form
    pub fn normalize_dates(mut self, normalize_dates: bool) -> Self {
        self.config.normalize_dates = normalize_dates;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ProcessorConfig {
        self.config
    }
}

impl ProcessorConfig {
    /// Create a new builder
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ProcessorConfig::builder()
            .min_span_chars(10)
            .normalize_dates(false)
            .build();

        assert_eq!(config.min_span_chars, 10);
        assert!(!config.normalize_dates);
    }
}
