//! # Docent - A Keyword-Retrieval Chatbot for Uploaded Documents and Websites
//!
//! This crate implements a small self-hosted chatbot that answers questions from
//! two kinds of sources: plain-text files uploaded by the user and pages scraped
//! from one configured website. Retrieval is keyword-overlap matching over
//! cleaned text spans; there is no model inference and no database.
//!
//! ## Features
//!
//! - Text processing with best-effort date normalization for newsletter-style
//!   content with inconsistent formatting
//! - Single-site scraping (root page plus its direct links) with HTML stripping
//! - An in-memory corpus with a keyword index, a date-ordered event timeline,
//!   and a topic index built from capitalized phrases
//! - Answer assembly from the best-matching spans, with a fixed fallback
//!   sentence when nothing overlaps the question
//! - A web front end with one explicit request handler per user action
//!   (upload, scrape, ask)
//! - Async API with Tokio
//! - Robust error handling and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use docent::corpus::{Corpus, Origin};
//! use docent::processor::{ProcessorConfig, process};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProcessorConfig::default();
//!     let doc = process(
//!         "The spring concert is on April 12. Rehearsals start March 3.",
//!         Origin::upload("newsletter.txt"),
//!         &config,
//!     );
//!
//!     let mut corpus = Corpus::new();
//!     corpus.add_document(doc);
//!
//!     let answer = corpus.answer("When is the spring concert?");
//!     println!("{}", answer.text);
//!     Ok(())
//! }
//! ```

mod error;

pub mod corpus;
pub mod processor;
pub mod scraper;
pub mod server;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
