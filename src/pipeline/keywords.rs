//! Keyword extraction: frequency-ranked years, capitalised words and acronyms.
//!
//! Tokens are runs of two or more ASCII letters, digits, parentheses or
//! hyphens between ASCII word boundaries. A token is a candidate when it is
//!
//! - a four-digit year (`1947`),
//! - capitalised, i.e. an upper-case letter followed by a lower-case one
//!   (`Gandhi`, `Non-cooperation`), or
//! - an acronym made only of upper-case letters (`NCERT`).
//!
//! Parentheses are stripped before counting, so `(Gandhi)` and `Gandhi`
//! are the same term. Counting is case-sensitive.

use crate::output::Keyword;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static RE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[A-Za-z0-9()\-]{2,}(?-u:\b)").unwrap());
static RE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());
static RE_CAPITALISED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]").unwrap());
static RE_ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,}$").unwrap());

/// Rank candidate terms in `text` and keep the top `limit`.
///
/// Ordered by descending frequency; equal frequencies keep the order in
/// which the terms first appeared.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<Keyword> {
    let mut ranked: Vec<Keyword> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in RE_TOKEN.find_iter(text).map(|m| m.as_str()) {
        if !is_candidate(token) {
            continue;
        }
        let term = strip_parentheses(token);
        if term.is_empty() {
            continue;
        }
        match index.get(&term) {
            Some(&i) => ranked[i].frequency += 1,
            None => {
                index.insert(term.clone(), ranked.len());
                ranked.push(Keyword { term, frequency: 1 });
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    ranked.truncate(limit);
    ranked
}

/// Whether a raw token passes the year / capitalised / acronym filter.
pub fn is_candidate(token: &str) -> bool {
    RE_YEAR.is_match(token) || RE_CAPITALISED.is_match(token) || RE_ACRONYM.is_match(token)
}

fn strip_parentheses(token: &str) -> String {
    token.chars().filter(|c| !matches!(c, '(' | ')')).collect()
}
