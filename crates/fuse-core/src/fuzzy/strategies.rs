//! Fuzzy matching strategies
//!
//! Each strategy returns a similarity in 0.0-1.0 (higher is closer).
//! Substring search uses SIMD via memchr when the `simd` feature is on.

use std::cmp::Ordering;

use strsim::{jaro_winkler, levenshtein, normalized_levenshtein};

/// Similarity scale for matches against a token window, the word boundary level
const WINDOW_SCALE: f64 = 0.85;

/// Match result from a strategy
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyMatch {
    pub similarity: f64,
    pub strategy: &'static str,
}

impl StrategyMatch {
    fn new(similarity: f64, strategy: &'static str) -> Self {
        Self {
            similarity,
            strategy,
        }
    }

    /// Distance in the result convention: 0.0 is a perfect match.
    pub fn distance(&self) -> f64 {
        (1.0 - self.similarity).clamp(0.0, 1.0)
    }
}

/// Tuning for the strategy cascade
#[derive(Debug, Clone, Copy)]
pub struct StrategyConfig {
    /// Queries shorter than this skip Jaro-Winkler and Levenshtein
    pub min_fuzzy_length: usize,
    pub max_edit_distance: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            min_fuzzy_length: 3,
            max_edit_distance: 2,
        }
    }
}

/// Try exact match (similarity: 1.0)
#[inline]
pub fn exact_match(query: &str, item: &str) -> Option<StrategyMatch> {
    (query == item).then(|| StrategyMatch::new(1.0, "exact"))
}

/// Try prefix match (similarity: 0.9)
#[inline]
pub fn prefix_match(query: &str, item: &str) -> Option<StrategyMatch> {
    item.starts_with(query).then(|| StrategyMatch::new(0.9, "prefix"))
}

/// Try word boundary match (similarity: 0.85)
/// Matches when query equals a complete word in item (split on whitespace, underscore, hyphen)
#[inline]
pub fn word_boundary_match(query: &str, item: &str) -> Option<StrategyMatch> {
    tokenize(item)
        .any(|word| word == query)
        .then(|| StrategyMatch::new(0.85, "word_boundary"))
}

/// Split on whitespace, underscore and hyphen, dropping empty pieces
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|token| !token.is_empty())
}

/// Try substring match (similarity: 0.65-0.75, earlier is better)
#[inline]
pub fn substring_match(query: &str, item: &str) -> Option<StrategyMatch> {
    find_substring(query, item).map(|pos| {
        let pos_penalty = (pos as f64 / item.len() as f64) * 0.1;
        StrategyMatch::new((0.75 - pos_penalty).max(0.65), "substring")
    })
}

#[cfg(feature = "simd")]
fn find_substring(query: &str, item: &str) -> Option<usize> {
    memchr::memmem::find(item.as_bytes(), query.as_bytes())
}

#[cfg(not(feature = "simd"))]
fn find_substring(query: &str, item: &str) -> Option<usize> {
    item.find(query)
}

/// Try Jaro-Winkler similarity (similarity: 0.6-0.82)
#[inline]
pub fn jaro_winkler_match(query: &str, item: &str) -> Option<StrategyMatch> {
    let jw_score = jaro_winkler(query, item);
    if jw_score > 0.85 {
        // Maps 0.85-1.0 to 0.6-0.825
        let similarity = (0.6 + (jw_score - 0.85) * 1.5).min(0.82);
        Some(StrategyMatch::new(similarity, "jaro_winkler"))
    } else {
        None
    }
}

/// Try Levenshtein edit distance (similarity: 0.6-0.8)
#[inline]
pub fn levenshtein_match(query: &str, item: &str, max_edit_distance: usize) -> Option<StrategyMatch> {
    let edit_dist = levenshtein(query, item);
    if edit_dist > max_edit_distance {
        return None;
    }
    let max_len = query.chars().count().max(item.chars().count());
    if max_len == 0 {
        return None;
    }
    let similarity = 0.8 - (edit_dist as f64 / max_len as f64) * 0.4;
    (similarity >= 0.6).then(|| StrategyMatch::new(similarity, "levenshtein"))
}

/// Weak similarity for anything the other strategies reject (similarity: 0.0-0.6)
#[inline]
pub fn fallback_match(query: &str, item: &str) -> StrategyMatch {
    StrategyMatch::new(normalized_levenshtein(query, item) * 0.6, "edit_ratio")
}

/// Apply all strategies in order, return the first that accepts.
///
/// Both inputs must already be case-folded if the search is case-insensitive.
pub fn score_match(query: &str, item: &str, config: StrategyConfig) -> StrategyMatch {
    if let Some(m) = exact_match(query, item)
        .or_else(|| prefix_match(query, item))
        .or_else(|| word_boundary_match(query, item))
        .or_else(|| substring_match(query, item))
    {
        return m;
    }

    if query.chars().count() >= config.min_fuzzy_length {
        if let Some(m) = jaro_winkler_match(query, item)
            .or_else(|| levenshtein_match(query, item, config.max_edit_distance))
        {
            return m;
        }
    }

    fallback_match(query, item)
}

/// Best match of the query against runs of consecutive field tokens.
///
/// Each window spans as many tokens as the query and is scored with the full
/// cascade. Returns `None` when the field has no more tokens than the query,
/// since `score_match` on the whole field already covers that case.
pub fn window_match(
    query: &str,
    tokens: &[String],
    config: StrategyConfig,
) -> Option<StrategyMatch> {
    let query_tokens: Vec<&str> = tokenize(query).collect();
    let width = query_tokens.len();
    if width == 0 || tokens.len() <= width {
        return None;
    }

    let query = query_tokens.join(" ");
    tokens
        .windows(width)
        .map(|window| score_match(&query, &window.join(" "), config))
        .max_by(|a, b| a.similarity.partial_cmp(&b.similarity).unwrap_or(Ordering::Equal))
        .map(|m| StrategyMatch::new(m.similarity * WINDOW_SCALE, "window"))
}
