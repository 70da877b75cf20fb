//! The search capability seam consumed by the node.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::engine::FuseIndex;
use super::options::SearchOptions;
use crate::error::Result;

/// A searchable record: a JSON object keyed by field name.
pub type Record = Map<String, Value>;

/// One ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The matched corpus entry
    pub item: Value,
    /// Position of the entry in the corpus
    pub ref_index: usize,
    /// Distance score, lower is better
    pub score: f64,
}

/// Fuzzy search over a corpus of records.
///
/// `config` is an options object; `keys` names the fields to search. The
/// returned order is the relevance order callers must preserve.
pub trait SearchCapability {
    fn search(&self, query: &str, corpus: &[Record], config: &Record) -> Result<Vec<SearchResult>>;
}

/// Default capability backed by [`FuseIndex`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzySearch;

impl SearchCapability for FuzzySearch {
    fn search(&self, query: &str, corpus: &[Record], config: &Record) -> Result<Vec<SearchResult>> {
        let options = SearchOptions::from_config(config)?;
        let index = FuseIndex::new(corpus, options);

        debug!(
            records = index.len(),
            hash = %index.index_hash(),
            "Built search index"
        );

        Ok(index.search(query))
    }
}
