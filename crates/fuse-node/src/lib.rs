//! # Fuse Node Shared Library
//!
//! Infrastructure shared by workflow node plugins:
//! - **plugin**: node metadata, the execution context a host provides, and an
//!   in-process runtime for driving a node without a host
//! - **error**: Common error types with context
//! - **tracing**: Logging utilities with segment prefixes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fuse_node::plugin::{ExecuteContext, NodeType, LocalRuntime};
//! use fuse_node::Error;
//! ```

pub mod error;
pub mod plugin;
pub mod tracing;

// Re-export commonly used items at crate root
pub use error::{Error, Result};
pub use plugin::{
    return_json_array, ExecuteContext, JsonObject, LocalRuntime, NodeDescription,
    NodeExecutionData, NodeProperty, NodeType, PropertyType, StaticContext,
};
