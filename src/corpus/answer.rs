//! Answer assembly from ranked corpus entries
//!
//! A reply is the top overlapping spans concatenated (later ones introduced
//! with "Additionally,"), followed by up to two related spans pulled from the
//! event timeline or the topic index, and a closing source note. Replies whose
//! best overlap covers less than half the question get a pointer to the
//! directors appended. When nothing in the corpus shares a keyword with the
//! question the reply is a fixed fallback sentence.

use super::search::{rank_by_overlap, shares_term};
use super::Corpus;
use crate::processor::tokenize;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Fixed reply used when no span overlaps the question
pub const FALLBACK_ANSWER: &str =
    "I have some information on this topic, but please ask the directors for further details.";

/// Appended to replies whose best overlap covers less than half the question
pub const LOW_CONFIDENCE_ADDENDUM: &str =
    "If you need more specific details, please ask the directors for further information.";

const LOW_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Spans concatenated into the body of a reply
const MAX_PRIMARY_SPANS: usize = 3;

/// Related spans appended after the body
const MAX_RELATED_SPANS: usize = 2;

/// An assembled reply to one question
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// The reply text
    pub text: String,

    /// Source labels that contributed spans, in first-use order
    pub sources: Vec<String>,

    /// Rough confidence in [0, 1] derived from keyword overlap
    pub confidence: f32,
}

impl Answer {
    fn fallback() -> Self {
        Answer {
            text: FALLBACK_ANSWER.to_string(),
            sources: Vec::new(),
            confidence: 0.0,
        }
    }
}

impl Corpus {
    /// Answer a question from the current corpus snapshot
    ///
    /// Every question is independent; no conversation state is kept.
    #[instrument(skip(self))]
    pub fn answer(&self, question: &str) -> Answer {
        let terms = tokenize(question);
        if self.is_empty() || terms.is_empty() {
            return Answer::fallback();
        }

        let ranked = rank_by_overlap(self, &terms, MAX_PRIMARY_SPANS);
        if ranked.is_empty() {
            return Answer::fallback();
        }
        debug!("{} spans matched the question", ranked.len());

        let mut text = String::new();
        let mut sources: Vec<String> = Vec::new();
        let mut included: HashSet<usize> = HashSet::new();

        for (rank, &(id, _)) in ranked.iter().enumerate() {
            let entry = &self.entries[id];
            if rank == 0 {
                text.push_str(&entry.text);
            } else {
                text.push_str("Additionally, ");
                text.push_str(&decapitalize(&entry.text));
            }
            text.push_str("\n\n");
            push_source(&mut sources, self.source_label(entry));
            included.insert(id);
        }

        let related = self.related_entries(&terms, &included);
        if !related.is_empty() {
            text.push_str("You might also be interested to know that:\n");
            for id in related {
                let entry = &self.entries[id];
                text.push_str("- ");
                text.push_str(&entry.text);
                text.push('\n');
                push_source(&mut sources, self.source_label(entry));
            }
            text.push('\n');
        }

        text.push_str(&format!(
            "This information comes from {}.",
            sources.join(", ")
        ));

        let best_overlap = ranked[0].1 as f32;
        let distinct_terms: HashSet<&str> = terms.iter().map(String::as_str).collect();
        let confidence = (best_overlap / distinct_terms.len() as f32).min(0.9);

        if confidence < LOW_CONFIDENCE_THRESHOLD {
            text.push_str("\n\n");
            text.push_str(LOW_CONFIDENCE_ADDENDUM);
        }

        Answer {
            text,
            sources,
            confidence,
        }
    }

    /// Spans related to the question but not already in the reply
    ///
    /// The event timeline is consulted first (chronological order), then the
    /// topic index for topics mentioning a query term.
    fn related_entries(&self, terms: &[String], included: &HashSet<usize>) -> Vec<usize> {
        let mut related: Vec<usize> = Vec::new();

        for &id in &self.timeline {
            if related.len() >= MAX_RELATED_SPANS {
                return related;
            }
            if included.contains(&id) || related.contains(&id) {
                continue;
            }
            if shares_term(self, id, terms) {
                related.push(id);
            }
        }

        for (topic, ids) in &self.topics {
            let topic_lower = topic.to_lowercase();
            if !terms.iter().any(|t| topic_lower.contains(t.as_str())) {
                continue;
            }
            for &id in ids {
                if related.len() >= MAX_RELATED_SPANS {
                    return related;
                }
                if !included.contains(&id) && !related.contains(&id) {
                    related.push(id);
                }
            }
        }

        related
    }
}

fn decapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn push_source(sources: &mut Vec<String>, label: &str) {
    if !sources.iter().any(|s| s == label) {
        sources.push(label.to_string());
    }
}
