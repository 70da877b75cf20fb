//! FuseSearchNode - adapter between the host contract and the search capability

use fuse_core::{FuzzySearch, SearchCapability, SearchResult};
use fuse_node::plugin::{ConnectionType, NodeDefaults, PropertyType};
use fuse_node::tracing::prefix;
use fuse_node::{
    return_json_array, Error, ExecuteContext, JsonObject, NodeDescription, NodeExecutionData,
    NodeProperty, NodeType, Result,
};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::params::{self, ITEMS, KEYS, OPTIONS, QUERY, VALUE_FIELD};

/// Registered node name.
pub const NODE_NAME: &str = "fuseSearch";

/// Field attached to every output record.
pub const SCORE_FIELD: &str = "score";

/// Field carrying the message of a failed item when continuing on failure.
pub const ERROR_FIELD: &str = "error";

/// Fuzzy search node, generic over the search capability it delegates to.
pub struct FuseSearchNode<C = FuzzySearch> {
    capability: C,
}

impl FuseSearchNode {
    /// Create a node backed by the default capability
    pub fn new() -> Self {
        Self::with_capability(FuzzySearch)
    }
}

impl Default for FuseSearchNode {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SearchCapability> FuseSearchNode<C> {
    pub fn with_capability(capability: C) -> Self {
        Self { capability }
    }

    /// Run one invocation: normalize the corpus, search it, flatten matches.
    ///
    /// Results keep the capability's order.
    pub fn search(
        &self,
        query: &str,
        raw_items: Value,
        raw_keys: &Value,
        raw_options: Value,
    ) -> Result<Vec<JsonObject>> {
        let corpus = params::normalize_items(raw_items)?;
        let keys = params::parse_keys(raw_keys)?;
        let options = params::parse_options(raw_options)?;

        if keys.is_empty() {
            warn!("No search keys given, nothing can match");
        }

        let config = params::merge_keys(options, &keys);
        debug!(records = corpus.len(), keys = ?keys, "Normalized corpus");
        trace!(corpus = ?corpus, config = ?config, "Search input");

        let matches = self
            .capability
            .search(query, &corpus, &config)
            .map_err(Error::search)?;

        debug!(matches = matches.len(), "Search complete");
        Ok(matches.into_iter().map(flatten_match).collect())
    }

    /// Resolve the parameters of one batch item and search.
    fn search_item(&self, ctx: &dyn ExecuteContext, index: usize) -> Result<Vec<JsonObject>> {
        let raw_items = ctx.node_parameter(ITEMS, index)?;
        let query = params::parse_query(ctx.node_parameter(QUERY, index)?)?;
        let raw_keys = ctx.node_parameter(KEYS, index)?;
        let raw_options = ctx.node_parameter(OPTIONS, index)?;

        self.search(&query, raw_items, &raw_keys, raw_options)
    }
}

impl<C: SearchCapability> NodeType for FuseSearchNode<C> {
    fn description(&self) -> NodeDescription {
        NodeDescription {
            display_name: "Fuse Search".to_string(),
            name: NODE_NAME.to_string(),
            icon: Some("file:fuse.svg".to_string()),
            group: vec!["transform".to_string()],
            version: 1,
            description: "Fuzzy search over a list of records".to_string(),
            defaults: NodeDefaults {
                name: "Fuse Search".to_string(),
            },
            inputs: vec![ConnectionType::Main],
            outputs: vec![ConnectionType::Main],
            properties: vec![
                NodeProperty::new("Query", QUERY, PropertyType::String, "")
                    .description("The search query"),
                NodeProperty::new("Item List (JSON)", ITEMS, PropertyType::Json, "[]")
                    .description("The records to search, as JSON text or an array of objects"),
                NodeProperty::new("Keys", KEYS, PropertyType::String, VALUE_FIELD)
                    .placeholder("title,author.name")
                    .description("Keys to search in. Separate multiple keys with commas."),
                NodeProperty::new("Advanced Options (JSON)", OPTIONS, PropertyType::Json, "{}")
                    .description("Search options as a JSON object"),
            ],
        }
    }

    /// One output list per input item. The first failing item aborts the run
    /// unless the context asks to continue on failure, in which case that
    /// item yields a single `{ "error": ... }` record.
    fn execute(&self, ctx: &dyn ExecuteContext) -> Result<Vec<Vec<NodeExecutionData>>> {
        let count = ctx.input_data().len();
        let mut output = Vec::with_capacity(count);

        for index in 0..count {
            trace!("{} Processing item {}", prefix::PULSE, index);

            match self.search_item(ctx, index) {
                Ok(records) => output.push(return_json_array(records)),
                Err(e) if ctx.continue_on_fail() => {
                    warn!(item = index, error = %e, "Item failed, continuing");
                    output.push(return_json_array(vec![error_record(&e)]));
                }
                Err(e) => return Err(e.at_item(index)),
            }
        }

        Ok(output)
    }
}

/// Copy a match into a fresh output record and attach its score.
fn flatten_match(result: SearchResult) -> JsonObject {
    let mut output = match result.item {
        Value::Object(fields) => fields,
        other => {
            let mut record = JsonObject::new();
            record.insert(VALUE_FIELD.to_string(), other);
            record
        }
    };
    output.insert(SCORE_FIELD.to_string(), Value::from(result.score));
    output
}

fn error_record(err: &Error) -> JsonObject {
    let mut record = JsonObject::new();
    record.insert(ERROR_FIELD.to_string(), Value::String(err.to_string()));
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuse_core::Record;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flatten_object_match() {
        let output = flatten_match(SearchResult {
            item: json!({"title": "Dune", "year": 1965}),
            ref_index: 0,
            score: 0.25,
        });
        assert_eq!(
            Value::Object(output),
            json!({"title": "Dune", "year": 1965, "score": 0.25})
        );
    }

    #[test]
    fn test_flatten_scalar_match() {
        let output = flatten_match(SearchResult {
            item: json!("Dune"),
            ref_index: 0,
            score: 0.5,
        });
        assert_eq!(Value::Object(output), json!({"value": "Dune", "score": 0.5}));
    }

    #[test]
    fn test_flatten_overwrites_score_field() {
        let output = flatten_match(SearchResult {
            item: json!({"title": "Dune", "score": 99}),
            ref_index: 0,
            score: 0.1,
        });
        assert_eq!(output["score"], json!(0.1));
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn test_description_defaults() {
        let desc = FuseSearchNode::new().description();
        assert_eq!(desc.name, NODE_NAME);
        assert_eq!(desc.default_for(QUERY), Some(&json!("")));
        assert_eq!(desc.default_for(ITEMS), Some(&json!("[]")));
        assert_eq!(desc.default_for(KEYS), Some(&json!("value")));
        assert_eq!(desc.default_for(OPTIONS), Some(&json!("{}")));
    }

    #[test]
    fn test_search_scalar_corpus() {
        let node = FuseSearchNode::new();
        let output = node
            .search("hobbit", json!(r#""The Hobbit""#), &json!("value"), json!("{}"))
            .unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output[0]["value"], "The Hobbit");
    }

    #[test]
    fn test_search_error_wraps_capability_error() {
        let node = FuseSearchNode::new();
        let err = node
            .search("x", json!("[1]"), &json!("value"), json!(r#"{"threshold": 7}"#))
            .unwrap_err();
        assert!(matches!(err, Error::Search(_)));
    }

    /// Capability that records nothing and returns a fixed, unsorted answer.
    struct FixedCapability;

    impl SearchCapability for FixedCapability {
        fn search(
            &self,
            _query: &str,
            corpus: &[Record],
            _config: &Record,
        ) -> fuse_core::Result<Vec<SearchResult>> {
            Ok(corpus
                .iter()
                .enumerate()
                .rev()
                .map(|(i, r)| SearchResult {
                    item: Value::Object(r.clone()),
                    ref_index: i,
                    score: 0.9 - i as f64 * 0.1,
                })
                .collect())
        }
    }

    #[test]
    fn test_capability_order_and_scores_untouched() {
        let node = FuseSearchNode::with_capability(FixedCapability);
        let output = node
            .search("", json!("[1, 2, 3]"), &json!("value"), json!("{}"))
            .unwrap();

        let values: Vec<Value> = output.iter().map(|r| r["value"].clone()).collect();
        let scores: Vec<Value> = output.iter().map(|r| r["score"].clone()).collect();
        assert_eq!(values, vec![json!(3), json!(2), json!(1)]);
        assert_eq!(scores, vec![json!(0.9 - 2.0 * 0.1), json!(0.9 - 0.1), json!(0.9)]);
    }
}
