//! Span splitting and tokenization
//!
//! A span is the atomic retrievable unit: one sentence, grouped out of the
//! paragraph structure of the source text. Splitting is whitespace-tolerant
//! and never fails; garbage input simply produces no spans.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English words carrying no retrieval signal
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be",
        "because", "been", "but", "by", "can", "could", "did", "do", "does", "for", "from",
        "had", "has", "have", "he", "her", "his", "how", "i", "if", "in", "into", "is", "it",
        "its", "just", "me", "my", "no", "not", "of", "on", "or", "our", "she", "so", "some",
        "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "to",
        "was", "we", "were", "what", "when", "where", "which", "who", "will", "with", "would",
        "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Split raw text into cleaned spans, preserving source order
///
/// Paragraphs are separated by blank lines; each paragraph is then split into
/// sentences. Control characters are stripped and whitespace runs collapsed.
pub fn split_spans(text: &str) -> Vec<String> {
    let mut spans = Vec::new();

    for paragraph in paragraphs(text) {
        for sentence in split_sentences(&paragraph) {
            if !sentence.is_empty() {
                spans.push(sentence);
            }
        }
    }

    spans
}

/// Lowercase alphanumeric tokens with stopwords removed
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            push_token(&mut tokens, &mut current);
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, &mut current);
    }

    tokens
}

fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    let token = std::mem::take(current);
    if !STOPWORDS.contains(token.as_str()) {
        tokens.push(token);
    }
}

/// Group lines into paragraphs on blank-line boundaries, collapsing whitespace
fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line = clean_line(line);
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// Strip control characters and collapse whitespace runs within one line
fn clean_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if !ch.is_control() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    out
}

/// Split one paragraph into sentences at terminator-plus-whitespace boundaries
fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?') {
            let at_boundary = chars
                .peek()
                .map(|(_, next)| next.is_whitespace())
                .unwrap_or(true);
            if at_boundary {
                let end = idx + ch.len_utf8();
                let sentence = paragraph[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = end;
            }
        }
    }

    let tail = paragraph[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_spans_paragraphs_and_sentences() {
        let text = "First sentence. Second sentence!\n\nNew paragraph here";
        let spans = split_spans(text);

        assert_eq!(
            spans,
            vec!["First sentence.", "Second sentence!", "New paragraph here"]
        );
    }

    #[test]
    fn test_split_spans_collapses_whitespace() {
        let spans = split_spans("met   on\t3  15");
        assert_eq!(spans, vec!["met on 3 15"]);
    }

    #[test]
    fn test_split_spans_joins_wrapped_lines() {
        let spans = split_spans("The concert is\non Saturday.");
        assert_eq!(spans, vec!["The concert is on Saturday."]);
    }

    #[test]
    fn test_split_spans_empty_input() {
        assert!(split_spans("").is_empty());
        assert!(split_spans("\n\n   \n").is_empty());
    }

    #[test]
    fn test_split_sentences_no_boundary_inside_numbers() {
        // 3.15 has no whitespace after the period, so it is not a boundary.
        let spans = split_spans("Version 3.15 shipped. It works.");
        assert_eq!(spans, vec!["Version 3.15 shipped.", "It works."]);
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_stopwords() {
        let tokens = tokenize("When is the Spring Concert?");
        assert_eq!(tokens, vec!["spring", "concert"]);
    }

    #[test]
    fn test_tokenize_keeps_numbers() {
        let tokens = tokenize("March 15, 2025");
        assert_eq!(tokens, vec!["march", "15", "2025"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("... !!!").is_empty());
    }
}
