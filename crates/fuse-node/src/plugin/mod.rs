//! Node plugin infrastructure.
//!
//! A node declares metadata ([`NodeDescription`]) and exposes one execution
//! entry point ([`NodeType::execute`]). The host supplies input items and
//! per-item parameter values through [`ExecuteContext`]; [`StaticContext`]
//! and [`LocalRuntime`] stand in for a host when running nodes locally.

mod context;
mod description;
mod node;
mod runtime;

pub use context::{return_json_array, ExecuteContext, JsonObject, NodeExecutionData};
pub use description::{ConnectionType, NodeDefaults, NodeDescription, NodeProperty, PropertyType};
pub use node::NodeType;
pub use runtime::{LocalRuntime, StaticContext};
