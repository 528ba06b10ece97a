//! # Corpus Module
//!
//! The corpus integrates processed documents from all sources (uploads and
//! scraped pages) into one searchable collection and answers questions over
//! it. It is the only stateful piece of the system: an append-only, in-memory
//! collection living for the duration of a session.
//!
//! ## Key Components
//!
//! - `Corpus`: Ordered entries plus the derived indexes
//! - `Entry`: One retrievable span with its origin and optional date
//! - `Answer`: Assembled reply with sources and a confidence score
//!
//! ## Derived Indexes
//!
//! - Keyword index: lowercase keyword to the ordered set of entry ids
//!   containing it, the backbone of overlap retrieval
//! - Event timeline: entries carrying a recognized date, ordered
//!   chronologically, used to surface related upcoming events
//! - Topic index: capitalized phrases (section headings, shouted
//!   announcements) mapped to the entries mentioning them
//!
//! There are no uniqueness or consistency guarantees beyond "contains
//! everything processed so far"; `reset` is a full replacement.

mod answer;
mod search;

pub use answer::{Answer, FALLBACK_ANSWER, LOW_CONFIDENCE_ADDENDUM};

pub use crate::processor::Origin;
use crate::processor::{DateMatch, ProcessedDocument, tokenize};

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Capitalized phrases such as "SPRING CONCERT" double as topic markers
static TOPIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Z\s]+\b").expect("topic pattern is valid"));

/// One retrievable span in the corpus
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Insertion index, also the tie-breaking rank
    pub id: usize,

    /// Cleaned span text
    pub text: String,

    /// Index into the corpus source table
    pub source: usize,

    /// Date recognized inside the span, if any
    pub date: Option<DateMatch>,
}

/// A source that contributed entries to the corpus
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    /// Where the document came from
    pub origin: Origin,

    /// Number of spans the source contributed
    pub spans: usize,
}

/// The in-memory collection of spans from all ingested sources
#[derive(Debug, Default)]
pub struct Corpus {
    entries: Vec<Entry>,
    keywords: HashMap<String, BTreeSet<usize>>,
    timeline: Vec<usize>,
    topics: BTreeMap<String, Vec<usize>>,
    sources: Vec<SourceInfo>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processed document, updating all derived indexes
    ///
    /// Returns the number of entries added.
    #[instrument(skip(self, doc), fields(origin = doc.origin.label()))]
    pub fn add_document(&mut self, doc: ProcessedDocument) -> usize {
        let source = self.sources.len();
        let mut added = 0;

        for span in doc.spans {
            let id = self.entries.len();
            self.entries.push(Entry {
                id,
                text: span.text,
                source,
                date: span.date,
            });

            for token in tokenize(&self.entries[id].text) {
                self.keywords.entry(token).or_default().insert(id);
            }
            for topic in extract_topics(&self.entries[id].text) {
                self.topics.entry(topic).or_default().push(id);
            }
            if let Some(date) = self.entries[id].date.as_ref().map(|d| d.date) {
                let pos = self.timeline.partition_point(|&other| {
                    self.entries[other]
                        .date
                        .as_ref()
                        .is_some_and(|d| d.date <= date)
                });
                self.timeline.insert(pos, id);
            }

            added += 1;
        }

        self.sources.push(SourceInfo {
            origin: doc.origin,
            spans: added,
        });

        debug!("Added {} entries, corpus now holds {}", added, self.entries.len());
        added
    }

    /// Whether the corpus holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries across all sources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sources ingested so far, in ingestion order
    pub fn sources(&self) -> &[SourceInfo] {
        &self.sources
    }

    /// Look up an entry by id
    pub fn entry(&self, id: usize) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Label of the source that produced an entry
    pub fn source_label(&self, entry: &Entry) -> &str {
        self.sources[entry.source].origin.label()
    }

    /// Entry ids with a recognized date, in chronological order
    pub fn timeline(&self) -> &[usize] {
        &self.timeline
    }
}

fn extract_topics(text: &str) -> Vec<String> {
    TOPIC_RE
        .find_iter(text)
        .filter_map(|m| {
            let topic = m.as_str().trim().to_string();
            (topic.len() > 3).then_some(topic)
        })
        .collect()
}
