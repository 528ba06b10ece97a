//! # Date Normalization Module
//!
//! Newsletter text tends to carry dates in wildly inconsistent shapes:
//! `April 15, 2025`, `15th of April`, `4/15/25`, or a bare `3  15` with the
//! month implied and irregular spacing. This module recognizes those shapes
//! with pattern heuristics and rewrites confident matches in place to a
//! canonical `Month Day, Year` (or `Month Day` when no year is present) form.
//!
//! Fragments no pattern is confident about are left untouched; normalization
//! never fails. Rewriting canonical text again is a no-op, so the operation is
//! idempotent.
//!
//! Disambiguation rule for bare numeric pairs: the first number is read as the
//! month when it forms a valid date that way; otherwise the pair is swapped if
//! the second number can be a month. When both readings are valid, month-first
//! wins. A pair separated by a single space ("won 3 2") is left alone; only
//! `/`, `-`, or an irregular run of two or three spaces marks an implied
//! separator.
//!
//! Patterns match within a line only, so normalization can run on raw text
//! before whitespace cleanup without joining paragraphs.

use chrono::{Datelike, NaiveDate, Utc};
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

/// A recognized date fragment with its canonical rewrite
#[derive(Debug, Clone, Serialize)]
pub struct DateMatch {
    /// The fragment as it appeared in the source text
    pub original: String,

    /// The canonical `Month Day[, Year]` rewrite
    pub canonical: String,

    /// Best-effort calendar date (current year assumed when absent)
    pub date: NaiveDate,

    /// Whether the year was present in the source
    pub has_year: bool,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How the capture groups of a pattern are interpreted
#[derive(Debug, Clone, Copy)]
enum PatternKind {
    /// Named month with a four-digit year (`April 15, 2025`, `15th of April 2025`)
    NamedWithYear,

    /// Named month, no year (`April 15`, `15th of April`)
    NamedNoYear,

    /// Numeric month/day/year (`4/15/2025`, `4-15-25`)
    NumericWithYear,

    /// Bare numeric pair, month inferred (`4/15`, `3  15`)
    NumericNoYear,
}

static PATTERNS: LazyLock<Vec<(Regex, PatternKind)>> = LazyLock::new(|| {
    // `[^\S\n]` is horizontal whitespace: matches stay within one line.
    let table: [(&str, PatternKind); 6] = [
        (
            r"(?P<month>[A-Za-z]+)[^\S\n]+(?P<day>\d{1,2})(?:st|nd|rd|th)?,?[^\S\n]+(?P<year>\d{4})\b",
            PatternKind::NamedWithYear,
        ),
        (
            r"\b(?P<day>\d{1,2})(?:st|nd|rd|th)?[^\S\n]+(?:of[^\S\n]+)?(?P<month>[A-Za-z]+),?[^\S\n]+(?P<year>\d{4})\b",
            PatternKind::NamedWithYear,
        ),
        (
            r"\b(?P<month>\d{1,2})[/-](?P<day>\d{1,2})[/-](?P<year>\d{4}|\d{2})\b",
            PatternKind::NumericWithYear,
        ),
        (
            r"(?P<month>[A-Za-z]+)[^\S\n]+(?P<day>\d{1,2})(?:st|nd|rd|th)?\b",
            PatternKind::NamedNoYear,
        ),
        (
            r"\b(?P<day>\d{1,2})(?:st|nd|rd|th)?[^\S\n]+(?:of[^\S\n]+)?(?P<month>[A-Za-z]+)\b",
            PatternKind::NamedNoYear,
        ),
        (
            r"\b(?P<a>\d{1,2})(?:[/-]|[^\S\n]{2,3})(?P<b>\d{1,2})\b",
            PatternKind::NumericNoYear,
        ),
    ];

    table
        .into_iter()
        .map(|(pattern, kind)| {
            let re = Regex::new(pattern).expect("date pattern is valid");
            (re, kind)
        })
        .collect()
});

/// A validated match waiting to be rewritten
struct Candidate {
    start: usize,
    end: usize,
    month: u32,
    day: u32,
    year: Option<i32>,
    date: NaiveDate,
}

/// Rewrite recognized date fragments in `text` to canonical form
///
/// Returns the rewritten text together with the matches, in source order.
/// Text without confident matches is returned unchanged.
pub fn normalize_dates(text: &str) -> (String, Vec<DateMatch>) {
    let current_year = Utc::now().year();

    // Patterns are tried in priority order; a fragment claimed by an earlier
    // pattern is off-limits to later ones.
    let mut candidates: Vec<Candidate> = Vec::new();
    for (re, kind) in PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).map(|m| (m.start(), m.end()));
            let Some((start, end)) = whole else { continue };
            if candidates.iter().any(|c| start < c.end && end > c.start) {
                continue;
            }
            if let Some(candidate) = validate(&caps, *kind, current_year, start, end) {
                candidates.push(candidate);
            }
        }
    }

    if candidates.is_empty() {
        return (text.to_string(), Vec::new());
    }

    candidates.sort_by_key(|c| c.start);

    let mut out = String::with_capacity(text.len());
    let mut matches = Vec::with_capacity(candidates.len());
    let mut last = 0;

    for candidate in candidates {
        let canonical = canonical_form(candidate.month, candidate.day, candidate.year);
        out.push_str(&text[last..candidate.start]);
        out.push_str(&canonical);
        matches.push(DateMatch {
            original: text[candidate.start..candidate.end].to_string(),
            canonical,
            date: candidate.date,
            has_year: candidate.year.is_some(),
        });
        last = candidate.end;
    }
    out.push_str(&text[last..]);

    (out, matches)
}

/// Parse and validate one regex match; `None` means leave the text alone
fn validate(
    caps: &Captures,
    kind: PatternKind,
    current_year: i32,
    start: usize,
    end: usize,
) -> Option<Candidate> {
    let (month, day, year) = match kind {
        PatternKind::NamedWithYear => {
            let month = month_from_name(caps.name("month")?.as_str())?;
            let day: u32 = caps.name("day")?.as_str().parse().ok()?;
            let year: i32 = caps.name("year")?.as_str().parse().ok()?;
            (month, day, Some(year))
        }
        PatternKind::NamedNoYear => {
            let month = month_from_name(caps.name("month")?.as_str())?;
            let day: u32 = caps.name("day")?.as_str().parse().ok()?;
            (month, day, None)
        }
        PatternKind::NumericWithYear => {
            let month: u32 = caps.name("month")?.as_str().parse().ok()?;
            let day: u32 = caps.name("day")?.as_str().parse().ok()?;
            let year: i32 = caps.name("year")?.as_str().parse().ok()?;
            (month, day, Some(expand_two_digit_year(year)))
        }
        PatternKind::NumericNoYear => {
            let a: u32 = caps.name("a")?.as_str().parse().ok()?;
            let b: u32 = caps.name("b")?.as_str().parse().ok()?;
            // Month-first wins when both readings are plausible.
            if plausible_date(current_year, a, b) {
                (a, b, None)
            } else if plausible_date(current_year, b, a) {
                (b, a, None)
            } else {
                return None;
            }
        }
    };

    let date = NaiveDate::from_ymd_opt(year.unwrap_or(current_year), month, day)?;

    Some(Candidate {
        start,
        end,
        month,
        day,
        year,
        date,
    })
}

fn plausible_date(year: i32, month: u32, day: u32) -> bool {
    (1..=12).contains(&month) && NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Two-digit years below 50 are 2000s, the rest 1900s
fn expand_two_digit_year(year: i32) -> i32 {
    if year >= 100 {
        year
    } else if year < 50 {
        2000 + year
    } else {
        1900 + year
    }
}

/// Resolve a month name or unambiguous prefix (three letters or more)
fn month_from_name(name: &str) -> Option<u32> {
    if name.len() < 3 {
        return None;
    }
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| m.to_lowercase().starts_with(&lower))
        .map(|idx| idx as u32 + 1)
}

fn canonical_form(month: u32, day: u32, year: Option<i32>) -> String {
    let name = MONTH_NAMES[(month - 1) as usize];
    match year {
        Some(year) => format!("{} {}, {}", name, day, year),
        None => format!("{} {}", name, day),
    }
}
