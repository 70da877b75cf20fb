//! In-process stand-in for a workflow host.

use serde_json::Value;
use tracing::info;

use super::context::{ExecuteContext, JsonObject, NodeExecutionData};
use super::description::NodeDescription;
use super::node::NodeType;
use crate::error::{Error, Result};
use crate::tracing::prefix;

/// Execution context over a fixed batch.
///
/// Each batch entry is both an input item and its parameter values. A
/// parameter the entry omits resolves to the property default declared in
/// the node description.
pub struct StaticContext {
    description: NodeDescription,
    items: Vec<NodeExecutionData>,
    continue_on_fail: bool,
}

impl StaticContext {
    pub fn new(description: NodeDescription, batch: Vec<JsonObject>) -> Self {
        Self {
            description,
            items: batch.into_iter().map(NodeExecutionData::from).collect(),
            continue_on_fail: false,
        }
    }

    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}

impl ExecuteContext for StaticContext {
    fn input_data(&self) -> &[NodeExecutionData] {
        &self.items
    }

    fn node_parameter(&self, name: &str, item_index: usize) -> Result<Value> {
        let item = self.items.get(item_index).ok_or_else(|| {
            Error::invalid_parameter(name, format!("no input item at index {}", item_index))
        })?;

        if let Some(value) = item.json.get(name) {
            return Ok(value.clone());
        }

        self.description.default_for(name).cloned().ok_or_else(|| {
            Error::invalid_parameter(
                name,
                format!("not declared by node '{}'", self.description.name),
            )
        })
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}

/// Builder for running a node over a batch without a host.
pub struct LocalRuntime<N> {
    node: N,
    continue_on_fail: bool,
}

impl<N: NodeType> LocalRuntime<N> {
    /// Create a new runtime around a node.
    pub fn new(node: N) -> Self {
        Self {
            node,
            continue_on_fail: false,
        }
    }

    /// Isolate per-item failures instead of aborting the batch.
    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Execute the node once over the whole batch.
    pub fn run(&self, batch: Vec<JsonObject>) -> Result<Vec<Vec<NodeExecutionData>>> {
        let description = self.node.description();
        info!(
            "{} Starting {} v{}",
            prefix::PULSE_OPEN,
            description.display_name,
            description.version
        );
        info!("  Items: {}", batch.len());

        let name = description.display_name.clone();
        let ctx = StaticContext::new(description, batch).with_continue_on_fail(self.continue_on_fail);
        let output = self.node.execute(&ctx)?;

        let records: usize = output.iter().map(Vec::len).sum();
        info!("{} {} finished, {} output records", prefix::PULSE_CLOSE, name, records);
        Ok(output)
    }
}
