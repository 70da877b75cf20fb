//! Fuse Core
//!
//! The fuzzy-search capability behind the Fuse Search node. Records are JSON
//! objects, keys are dotted field paths, and every result carries a distance
//! score where lower means a stronger match.
//!
//! # Features
//!
//! - `simd` - SIMD-accelerated substring search via memchr
//!
//! # Example
//!
//! ```rust
//! use fuse_core::{FuzzySearch, Record, SearchCapability};
//! use serde_json::json;
//!
//! let corpus: Vec<Record> = vec![
//!     json!({"title": "The Hobbit"}).as_object().unwrap().clone(),
//!     json!({"title": "The Hunger Games"}).as_object().unwrap().clone(),
//! ];
//! let config = json!({"keys": ["title"]}).as_object().unwrap().clone();
//!
//! let results = FuzzySearch.search("hobbit", &corpus, &config).unwrap();
//! assert_eq!(results[0].item["title"], "The Hobbit");
//! ```

pub mod error;
pub mod fuzzy;

pub use error::{Result, SearchError};
pub use fuzzy::{
    FuseIndex, FuzzySearch, KeyPath, Record, SearchCapability, SearchOptions, SearchResult,
};
