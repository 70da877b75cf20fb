//! What a host hands a node during execution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A JSON object as carried between nodes.
pub type JsonObject = Map<String, Value>;

/// The host's standard record wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeExecutionData {
    pub json: JsonObject,
}

impl From<JsonObject> for NodeExecutionData {
    fn from(json: JsonObject) -> Self {
        Self { json }
    }
}

/// Execution services supplied by the host for one node run.
pub trait ExecuteContext {
    /// Items received on the main input, in order.
    fn input_data(&self) -> &[NodeExecutionData];

    /// Resolved value of a parameter for the item at `item_index`.
    fn node_parameter(&self, name: &str, item_index: usize) -> Result<Value>;

    /// Whether a failing item should produce an error record instead of
    /// aborting the run.
    fn continue_on_fail(&self) -> bool {
        false
    }
}

/// Wrap plain objects in the host's record wrapper.
pub fn return_json_array(records: Vec<JsonObject>) -> Vec<NodeExecutionData> {
    records.into_iter().map(NodeExecutionData::from).collect()
}
