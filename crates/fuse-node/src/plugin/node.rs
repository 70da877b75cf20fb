//! The contract every node implements.

use super::context::{ExecuteContext, NodeExecutionData};
use super::description::NodeDescription;
use crate::error::Result;

/// A workflow node: declared metadata plus a single execution entry point.
///
/// `execute` returns one output list per input item, in input order.
pub trait NodeType {
    fn description(&self) -> NodeDescription;

    fn execute(&self, ctx: &dyn ExecuteContext) -> Result<Vec<Vec<NodeExecutionData>>>;
}
