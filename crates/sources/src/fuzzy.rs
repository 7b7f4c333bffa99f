//! Fuzzy string scoring on a 0-100 scale.
//!
//! [`weighted_ratio`] combines these scorers:
//! - `ratio`: normalized Levenshtein similarity of the whole strings
//! - `token_sort_ratio`: same, after sorting the words
//! - `token_set_ratio`: shared words compared against each side's remainder
//! - `partial_ratio`: best match of the shorter string against any equal
//!   length window of the longer one
//!
//! The blend follows the usual "WRatio" weighting. The base similarity is
//! Levenshtein, not an indel/longest-block ratio, so individual scores can
//! differ by a few points from other WRatio implementations.
//!
//! Partial matching only applies when the lengths differ by 1.5x or more,
//! so "dark knight" can still find "The Dark Knight Rises".

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Lowercase, turn non-alphanumerics into spaces, collapse whitespace
pub fn full_process(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn score(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Whole-string similarity of already processed strings
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    score(normalized_levenshtein(a, b))
}

pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Split into shared words and the words only `a` or only `b` has, each sorted
fn token_set_parts(a: &str, b: &str) -> (String, String, String) {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    let join = |words: Vec<&str>| words.join(" ");
    let shared = join(set_a.intersection(&set_b).copied().collect());
    let only_a = join(set_a.difference(&set_b).copied().collect());
    let only_b = join(set_b.difference(&set_a).copied().collect());
    let combine = |rest: &str| format!("{} {}", shared, rest).trim().to_string();
    let (combined_a, combined_b) = (combine(&only_a), combine(&only_b));
    (shared, combined_a, combined_b)
}

fn token_set_with(a: &str, b: &str, scorer: fn(&str, &str) -> u8) -> u8 {
    let (shared, combined_a, combined_b) = token_set_parts(a, b);
    scorer(&shared, &combined_a)
        .max(scorer(&shared, &combined_b))
        .max(scorer(&combined_a, &combined_b))
}

pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set_with(a, b, ratio)
}

pub fn partial_token_sort_ratio(a: &str, b: &str) -> u8 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

pub fn partial_token_set_ratio(a: &str, b: &str) -> u8 {
    token_set_with(a, b, partial_ratio)
}

/// Best ratio of the shorter string against windows of the longer
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (short, long) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }
    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();

    let mut best = 0u8;
    for start in 0..=(long_chars.len() - width) {
        let window: String = long_chars[start..start + width].iter().collect();
        best = best.max(ratio(short, &window));
        if best == 100 {
            break;
        }
    }
    best
}

/// Weight applied to the token-based scorers
const UNBASE_SCALE: f64 = 0.95;

/// Combined score of two raw strings, 0-100
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let p1 = full_process(a);
    let p2 = full_process(b);
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let base = ratio(&p1, &p2) as f64;
    let (len1, len2) = (p1.chars().count() as f64, p2.chars().count() as f64);
    let len_ratio = len1.max(len2) / len1.min(len2);

    let best = if len_ratio < 1.5 {
        let sorted = token_sort_ratio(&p1, &p2) as f64 * UNBASE_SCALE;
        let set = token_set_ratio(&p1, &p2) as f64 * UNBASE_SCALE;
        base.max(sorted).max(set)
    } else {
        let scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        let partial = partial_ratio(&p1, &p2) as f64 * scale;
        let sorted = partial_token_sort_ratio(&p1, &p2) as f64 * UNBASE_SCALE * scale;
        let set = partial_token_set_ratio(&p1, &p2) as f64 * UNBASE_SCALE * scale;
        base.max(partial).max(sorted).max(set)
    };
    best.round() as u8
}
