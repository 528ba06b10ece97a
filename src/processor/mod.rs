//! # Text Processor Module
//!
//! This module turns raw text from any source (uploaded files, scraped pages)
//! into an ordered sequence of cleaned spans suitable for keyword retrieval.
//! It is the first stage of the ingestion pipeline and is deliberately
//! tolerant: malformed input is skipped or passed through, never surfaced as
//! an error.
//!
//! ## Key Components
//!
//! - `process`: Main entry point turning raw text into a `ProcessedDocument`
//! - `split_spans`: Paragraph- and sentence-level splitting with cleanup
//! - `normalize_dates`: Best-effort rewriting of date fragments to a
//!   canonical `Month Day[, Year]` form
//! - `tokenize`: Lowercase keyword extraction with stopword removal
//! - `ProcessorConfig`: Tuning knobs for span length and date handling
//!
//! ## Features
//!
//! - Handles newsletter-style content with inconsistent date formatting,
//!   including partial dates with a missing month or irregular spacing
//! - Silent pass-through for fragments no heuristic is confident about
//! - Stable span ordering so retrieval ties can be broken by source order

mod config;
mod dates;
mod spans;

pub use config::{ProcessorConfig, ProcessorConfigBuilder};
pub use dates::{DateMatch, normalize_dates};
pub use spans::{split_spans, tokenize};

use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, instrument};

/// Identifies where a document came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Origin {
    /// A file uploaded by the user
    Upload {
        /// Original filename of the upload
        name: String,
    },

    /// A page scraped from the configured website
    Web {
        /// URL of the page
        url: String,
    },
}

impl Origin {
    /// Create an upload origin from a filename
    pub fn upload(name: impl Into<String>) -> Self {
        Origin::Upload { name: name.into() }
    }

    /// Create a web origin from a page URL
    pub fn web(url: impl Into<String>) -> Self {
        Origin::Web { url: url.into() }
    }

    /// Human-readable label for the origin (filename or URL)
    pub fn label(&self) -> &str {
        match self {
            Origin::Upload { name } => name,
            Origin::Web { url } => url,
        }
    }
}

/// A cleaned span with an optional normalized date found inside it
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedSpan {
    /// The cleaned, date-normalized text of the span
    pub text: String,

    /// The first date recognized in the span, if any
    pub date: Option<DateMatch>,
}

/// The ordered output of processing one source document
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    /// Where the raw text came from
    pub origin: Origin,

    /// Cleaned spans in source order
    pub spans: Vec<ProcessedSpan>,
}

/// Process raw text into cleaned, date-normalized spans
///
/// Dates are normalized on the raw text first, before span splitting collapses
/// whitespace, so irregularly spaced fragments like `3  15` are still
/// recognized. Spans shorter than the configured minimum are dropped. Empty or
/// non-text input yields a document with no spans rather than an error.
#[instrument(skip(raw, config), fields(origin = origin.label()))]
pub fn process(raw: &str, origin: Origin, config: &ProcessorConfig) -> ProcessedDocument {
    let raw = if config.normalize_dates {
        Cow::Owned(normalize_dates(raw).0)
    } else {
        Cow::Borrowed(raw)
    };

    let mut spans = Vec::new();
    for span in split_spans(&raw) {
        if span.chars().count() < config.min_span_chars {
            continue;
        }

        // A second, idempotent pass per span recovers the date metadata and
        // catches fragments rejoined from wrapped lines.
        let (text, dates) = if config.normalize_dates {
            normalize_dates(&span)
        } else {
            (span, Vec::new())
        };

        spans.push(ProcessedSpan {
            text,
            date: dates.into_iter().next(),
        });
    }

    debug!("Processed {} spans from {}", spans.len(), origin.label());

    ProcessedDocument { origin, spans }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_splits_and_normalizes() {
        let config = ProcessorConfig::default();
        let doc = process(
            "The spring concert is on 4/12/2025. Tickets go on sale soon.\n\nRehearsals resume March 3.",
            Origin::upload("newsletter.txt"),
            &config,
        );

        assert_eq!(doc.spans.len(), 3);
        assert_eq!(
            doc.spans[0].text,
            "The spring concert is on April 12, 2025."
        );
        assert!(doc.spans[0].date.is_some());
        assert!(doc.spans[1].date.is_none());
        assert_eq!(doc.spans[2].text, "Rehearsals resume March 3.");
    }

    #[test]
    fn test_process_irregularly_spaced_pair() {
        let config = ProcessorConfig::default();
        let doc = process(
            "The sectional met on 3  15.",
            Origin::upload("notes.txt"),
            &config,
        );

        assert_eq!(doc.spans[0].text, "The sectional met on March 15.");
        assert!(doc.spans[0].date.is_some());
    }

    #[test]
    fn test_process_empty_input() {
        let config = ProcessorConfig::default();
        let doc = process("", Origin::upload("empty.txt"), &config);
        assert!(doc.spans.is_empty());
    }

    #[test]
    fn test_process_date_normalization_disabled() {
        let config = ProcessorConfig::builder().normalize_dates(false).build();
        let doc = process("Concert on 4/12/2025.", Origin::upload("a.txt"), &config);

        assert_eq!(doc.spans[0].text, "Concert on 4/12/2025.");
        assert!(doc.spans[0].date.is_none());
    }

    #[test]
    fn test_origin_labels() {
        assert_eq!(Origin::upload("news.txt").label(), "news.txt");
        assert_eq!(
            Origin::web("https://example.com/about").label(),
            "https://example.com/about"
        );
    }
}
