//! Keyword-overlap ranking over corpus entries
//!
//! Scoring is raw overlap count between the question keywords and the
//! keywords of each entry. No stemming, no weighting; ties are broken by
//! entry id, which is insertion order.

use super::Corpus;
use std::collections::{HashMap, HashSet};

/// Rank entries by how many distinct query terms they contain
///
/// Returns `(entry_id, overlap_count)` pairs, best first, at most `limit` of
/// them. Entries sharing no term are absent entirely.
pub(crate) fn rank_by_overlap(
    corpus: &Corpus,
    terms: &[String],
    limit: usize,
) -> Vec<(usize, usize)> {
    let mut overlap: HashMap<usize, usize> = HashMap::new();
    let mut counted: HashSet<&str> = HashSet::new();

    for term in terms {
        if !counted.insert(term) {
            continue;
        }
        if let Some(ids) = corpus.keywords.get(term.as_str()) {
            for &id in ids {
                *overlap.entry(id).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(usize, usize)> = overlap.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// Whether an entry contains at least one of the query terms
pub(crate) fn shares_term(corpus: &Corpus, id: usize, terms: &[String]) -> bool {
    terms.iter().any(|term| {
        corpus
            .keywords
            .get(term.as_str())
            .is_some_and(|ids| ids.contains(&id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::{Origin, ProcessorConfig, process};

    fn corpus_with(texts: &[&str]) -> Corpus {
        let mut corpus = Corpus::new();
        for (i, text) in texts.iter().enumerate() {
            corpus.add_document(process(
                text,
                Origin::upload(format!("doc{}.txt", i)),
                &ProcessorConfig::default(),
            ));
        }
        corpus
    }

    fn terms(question: &str) -> Vec<String> {
        crate::processor::tokenize(question)
    }

    #[test]
    fn test_higher_overlap_ranks_first() {
        let corpus = corpus_with(&[
            "Tickets are available at the door.",
            "Concert tickets go on sale Friday.",
        ]);

        let ranked = rank_by_overlap(&corpus, &terms("concert tickets"), 5);
        assert_eq!(ranked[0].1, 2);
        assert_eq!(
            corpus.entry(ranked[0].0).unwrap().text,
            "Concert tickets go on sale Friday."
        );
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let corpus = corpus_with(&[
            "The winter concert was lovely.",
            "The summer concert is next.",
        ]);

        let ranked = rank_by_overlap(&corpus, &terms("concert"), 5);
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].0 < ranked[1].0);
        assert_eq!(ranked[0].1, ranked[1].1);
    }

    #[test]
    fn test_duplicate_terms_count_once() {
        let corpus = corpus_with(&["Concert night."]);

        let ranked = rank_by_overlap(&corpus, &terms("concert concert concert"), 5);
        assert_eq!(ranked[0].1, 1);
    }

    #[test]
    fn test_no_overlap_is_empty() {
        let corpus = corpus_with(&["Concert night."]);
        assert!(rank_by_overlap(&corpus, &terms("zebras"), 5).is_empty());
    }
}
