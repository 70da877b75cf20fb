//! Fuse Search Node
//!
//! A workflow node that fuzzy-searches a user-supplied list of records and
//! emits every match with a `score` field (lower is a stronger match).
//!
//! ## Usage
//!
//! ```rust
//! use fuse_node::LocalRuntime;
//! use fuse_search::FuseSearchNode;
//! use serde_json::json;
//!
//! let params = json!({
//!     "query": "Hobbit",
//!     "items": r#"[{"title": "The Hobbit"}, {"title": "The Hunger Games"}]"#,
//!     "keys": "title",
//! });
//!
//! let output = LocalRuntime::new(FuseSearchNode::new())
//!     .run(vec![params.as_object().unwrap().clone()])
//!     .unwrap();
//!
//! assert_eq!(output[0][0].json["title"], "The Hobbit");
//! ```

pub mod node;
pub mod params;

pub use node::{FuseSearchNode, NODE_NAME};
pub use params::{merge_keys, normalize_items, parse_keys, parse_options, ItemsShape};
