//! FuseIndex - ranked fuzzy search over a record corpus

use std::hash::{Hash, Hasher};

use ahash::AHasher;
use serde_json::Value;
use tracing::trace;

use super::capability::{Record, SearchResult};
use super::options::SearchOptions;
use super::path::KeyPath;
use super::strategies::{self, StrategyConfig};

/// A single searchable field value, pre-folded for matching
#[derive(Debug, Clone)]
struct FieldValue {
    text: String,
    tokens: Vec<String>,
    norm: f64,
}

impl FieldValue {
    fn new(raw: &str, options: &SearchOptions) -> Self {
        let text = fold_case(raw, options.is_case_sensitive);
        let tokens = strategies::tokenize(&text).map(str::to_string).collect();
        Self {
            norm: field_norm(raw, options),
            text,
            tokens,
        }
    }
}

/// A corpus record with its searchable values, one list per key
#[derive(Debug, Clone)]
struct IndexedRecord {
    source: Record,
    fields: Vec<Vec<FieldValue>>,
}

/// In-memory index over one corpus
///
/// Built once per search configuration. Field text is extracted and
/// case-folded up front so queries only run the strategy cascade.
pub struct FuseIndex {
    records: Vec<IndexedRecord>,
    key_weight: f64,
    index_hash: String,
    options: SearchOptions,
    strategy: StrategyConfig,
}

impl FuseIndex {
    /// Index a corpus with the given options
    pub fn new(corpus: &[Record], options: SearchOptions) -> Self {
        let paths: Vec<KeyPath> = options.keys.iter().map(|k| KeyPath::parse(k)).collect();

        let records: Vec<IndexedRecord> = corpus
            .iter()
            .map(|record| IndexedRecord {
                source: record.clone(),
                fields: paths
                    .iter()
                    .map(|path| {
                        path.resolve(record)
                            .into_iter()
                            .map(|text| FieldValue::new(&text, &options))
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        let key_weight = if paths.is_empty() {
            0.0
        } else {
            1.0 / paths.len() as f64
        };
        let index_hash = compute_hash(corpus, &options.keys);

        Self {
            records,
            key_weight,
            index_hash,
            options,
            strategy: StrategyConfig::default(),
        }
    }

    /// Number of records considered for matching
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fingerprint of the indexed corpus and keys
    pub fn index_hash(&self) -> &str {
        &self.index_hash
    }

    /// Search the corpus, best matches first
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = fold_case(query.trim(), self.options.is_case_sensitive);
        if query.is_empty()
            || self.options.keys.is_empty()
            || query.chars().count() < self.options.min_match_char_length
        {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                self.score_record(&query, record).map(|score| SearchResult {
                    item: Value::Object(record.source.clone()),
                    ref_index: idx,
                    score,
                })
            })
            .collect();

        if self.options.should_sort {
            // Sort by score ascending, then by corpus position for stability
            results.sort_by(|a, b| {
                a.score
                    .partial_cmp(&b.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.ref_index.cmp(&b.ref_index))
            });
        }

        if let Some(limit) = self.options.limit {
            results.truncate(limit);
        }

        trace!(query = %query, matches = results.len(), "Search complete");
        results
    }

    /// Combine per-key distances into one record score.
    ///
    /// A value's distance is the better of the whole-field match and the best
    /// token window match. Only keys whose best distance is within the
    /// threshold contribute.
    /// Returns `None` when no key matched.
    fn score_record(&self, query: &str, record: &IndexedRecord) -> Option<f64> {
        let mut total = 1.0;
        let mut matched = false;

        for values in &record.fields {
            let best = values
                .iter()
                .map(|v| {
                    let whole = strategies::score_match(query, &v.text, self.strategy);
                    let distance = match strategies::window_match(query, &v.tokens, self.strategy) {
                        Some(window) if window.similarity > whole.similarity => window.distance(),
                        _ => whole.distance(),
                    };
                    (distance, v.norm)
                })
                .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            if let Some((distance, norm)) = best {
                if distance <= self.options.threshold {
                    let distance = if distance == 0.0 { f64::EPSILON } else { distance };
                    total *= distance.powf(self.key_weight * norm);
                    matched = true;
                }
            }
        }

        matched.then_some(total)
    }
}

fn fold_case(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

/// Longer fields weigh less: `1 / tokens^(0.5 * weight)`, rounded to 3 places
fn field_norm(text: &str, options: &SearchOptions) -> f64 {
    if options.ignore_field_norm {
        return 1.0;
    }
    let tokens = text.split(' ').filter(|t| !t.is_empty()).count().max(1);
    let norm = 1.0 / (tokens as f64).powf(0.5 * options.field_norm_weight);
    (norm * 1000.0).round() / 1000.0
}

fn compute_hash(corpus: &[Record], keys: &[String]) -> String {
    let mut hasher = AHasher::default();
    for record in corpus {
        Value::Object(record.clone()).to_string().hash(&mut hasher);
    }
    for key in keys {
        key.hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())
}
