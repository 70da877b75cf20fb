//! Fuzzy Record Search
//!
//! Multi-strategy fuzzy matching over JSON records. Each searched field value
//! is scored by the first strategy that accepts it:
//!
//! 1. Exact match (similarity: 1.0)
//! 2. Prefix match (similarity: 0.9)
//! 3. Word boundary match (similarity: 0.85)
//! 4. Substring match (similarity: 0.65-0.75)
//! 5. Jaro-Winkler similarity (similarity: 0.6-0.82)
//! 6. Levenshtein edit distance (similarity: 0.6-0.8)
//! 7. Normalized Levenshtein fallback (similarity: 0.0-0.6)
//!
//! Multi-word values are also scored window by window, one window per run of
//! tokens as long as the query, so `hobit` still finds `The Hobbit`.
//!
//! Similarities are reported as distances (`1 - similarity`), so a result
//! score of 0 is a perfect match and lower is always better.
//!
//! # Example
//!
//! ```rust
//! use fuse_core::fuzzy::{FuseIndex, SearchOptions};
//! use serde_json::json;
//!
//! let corpus = vec![json!({"name": "works_at"}).as_object().unwrap().clone()];
//! let options = SearchOptions::with_keys(["name"]);
//! let index = FuseIndex::new(&corpus, options);
//!
//! let results = index.search("works");
//! assert_eq!(results.len(), 1);
//! ```

mod capability;
mod engine;
mod options;
mod path;
mod strategies;

pub use capability::{FuzzySearch, Record, SearchCapability, SearchResult};
pub use engine::FuseIndex;
pub use options::SearchOptions;
pub use path::KeyPath;
