//! Fuse Search Node Runner
//!
//! Runs the fuzzy search node over a batch of parameter sets without a
//! workflow host.
//!
//! ## Usage
//!
//! ```bash
//! fuse-search --input batch.json
//! fuse-search --query Hobbit --items '[{"title":"The Hobbit"}]' --keys title
//! fuse-search --describe
//! ```
//!
//! A batch file holds a JSON array of parameter objects (or one object).
//! Parameters omitted from an entry use the node defaults.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `FUSE_SEARCH_LOG`: Default log filter (default: warn)
//! - `FUSE_SEARCH_CONTINUE_ON_FAIL`: Emit error records instead of aborting
//! - `RUST_LOG`: Overrides the log filter

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use fuse_node::{Error, JsonObject, LocalRuntime, NodeType};
use fuse_search::params::{ITEMS, KEYS, OPTIONS, QUERY};
use fuse_search::FuseSearchNode;
use serde_json::Value;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "fuse-search")]
#[command(about = "Fuzzy search over a list of records")]
#[command(version)]
struct Args {
    /// Batch file of parameter objects ("-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Search query for a single invocation
    #[arg(short, long)]
    query: Option<String>,

    /// Records to search, as JSON text
    #[arg(long)]
    items: Option<String>,

    /// Comma-separated keys to search
    #[arg(short, long)]
    keys: Option<String>,

    /// Search options, as a JSON object
    #[arg(short, long)]
    options: Option<String>,

    /// Print the node description and exit
    #[arg(long)]
    describe: bool,

    /// Emit an error record for a failing item instead of aborting
    #[arg(long, env = "FUSE_SEARCH_CONTINUE_ON_FAIL")]
    continue_on_fail: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FUSE_SEARCH_LOG", default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Parameters given as flags, if any.
    fn single_invocation(&self) -> Option<JsonObject> {
        let flags = [
            (QUERY, &self.query),
            (ITEMS, &self.items),
            (KEYS, &self.keys),
            (OPTIONS, &self.options),
        ];
        if flags.iter().all(|(_, v)| v.is_none()) {
            return None;
        }

        let mut params = JsonObject::new();
        for (name, value) in flags {
            if let Some(value) = value {
                params.insert(name.to_string(), Value::String(value.clone()));
            }
        }
        Some(params)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    fuse_node::tracing::init_with_filter(&args.log_level);

    let node = FuseSearchNode::new();

    if args.describe {
        print_json(&node.description(), args.pretty)?;
        return Ok(());
    }

    let batch = match (args.single_invocation(), &args.input) {
        (Some(params), None) => vec![params],
        (Some(_), Some(_)) => {
            return Err(Error::Config("--input cannot be combined with parameter flags".into()).into())
        }
        (None, input) => read_batch(input.as_ref())?,
    };
    debug!(items = batch.len(), "Loaded batch");

    let runtime = LocalRuntime::new(node).continue_on_fail(args.continue_on_fail);
    let output = runtime.run(batch).map_err(|e| {
        error!(error = %e, "Execution failed");
        e
    })?;

    let output: Vec<Vec<&JsonObject>> = output
        .iter()
        .map(|items| items.iter().map(|item| &item.json).collect())
        .collect();
    print_json(&output, args.pretty)?;

    Ok(())
}

/// Read a batch from a file or stdin.
fn read_batch(input: Option<&PathBuf>) -> fuse_node::Result<Vec<JsonObject>> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)?,
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    parse_batch(&text)
}

/// A batch is an array of parameter objects or a single object.
fn parse_batch(text: &str) -> fuse_node::Result<Vec<JsonObject>> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::parse("batch", e))?;
    let entries = match value {
        Value::Array(entries) => entries,
        other => vec![other],
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            Value::Object(params) => Ok(params),
            other => Err(Error::Config(format!(
                "batch entry {} must be an object, got {}",
                i, other
            ))),
        })
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> fuse_node::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_batch_array_and_object() {
        let batch = parse_batch(r#"[{"query": "a"}, {"query": "b"}]"#).unwrap();
        assert_eq!(batch.len(), 2);

        let batch = parse_batch(r#"{"query": "a"}"#).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0]["query"], json!("a"));
    }

    #[test]
    fn test_parse_batch_rejects_non_objects() {
        assert!(matches!(parse_batch("[1]"), Err(Error::Config(_))));
        assert!(parse_batch("[").unwrap_err().is_parse());
    }

    #[test]
    fn test_read_batch_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"query": "Hobbit", "keys": "title"}}]"#).unwrap();

        let batch = read_batch(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(batch[0]["keys"], json!("title"));
    }

    #[test]
    fn test_single_invocation_flags() {
        let args = Args::parse_from(["fuse-search", "--query", "Hobbit", "--keys", "title"]);
        let params = args.single_invocation().unwrap();
        assert_eq!(Value::Object(params), json!({"query": "Hobbit", "keys": "title"}));

        let args = Args::parse_from(["fuse-search", "--describe"]);
        assert!(args.single_invocation().is_none());
        assert!(args.describe);
    }
}
