//! Parameter parsing and corpus normalization.
//!
//! Parameters arrive either as JSON text (the editor's `json` type) or as
//! already-structured values. Everything here is pure so it can be tested
//! without a host.

use fuse_core::Record;
use fuse_node::{Error, Result};
use serde_json::Value;

pub const QUERY: &str = "query";
pub const ITEMS: &str = "items";
pub const KEYS: &str = "keys";
pub const OPTIONS: &str = "options";

/// Field used to wrap non-object corpus entries.
pub const VALUE_FIELD: &str = "value";

/// Shape of a parsed `items` value.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsShape {
    Array(Vec<Value>),
    Object(Record),
    Scalar(Value),
}

impl ItemsShape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::Array(values),
            Value::Object(map) => Self::Object(map),
            other => Self::Scalar(other),
        }
    }

    /// Corpus entries in order; a lone object or scalar is a one-entry corpus.
    pub fn into_elements(self) -> Vec<Value> {
        match self {
            Self::Array(values) => values,
            Self::Object(map) => vec![Value::Object(map)],
            Self::Scalar(value) => vec![value],
        }
    }
}

/// Parse a JSON-typed parameter. Text is parsed; structured values pass through.
pub fn parse_json_parameter(name: &str, raw: Value) -> Result<Value> {
    match raw {
        Value::String(text) => serde_json::from_str(&text).map_err(|e| Error::parse(name, e)),
        other => Ok(other),
    }
}

/// Turn one corpus entry into a record. Objects are kept, anything else
/// (null included) becomes `{ "value": entry }`.
pub fn normalize_element(element: Value) -> Record {
    match element {
        Value::Object(map) => map,
        other => {
            let mut record = Record::new();
            record.insert(VALUE_FIELD.to_string(), other);
            record
        }
    }
}

/// Parse the `items` parameter into a corpus of records.
pub fn normalize_items(raw: Value) -> Result<Vec<Record>> {
    let parsed = parse_json_parameter(ITEMS, raw)?;
    Ok(ItemsShape::classify(parsed)
        .into_elements()
        .into_iter()
        .map(normalize_element)
        .collect())
}

/// Split a comma-separated key list, dropping blank entries.
pub fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the `keys` parameter: comma-separated text or an array of strings.
pub fn parse_keys(raw: &Value) -> Result<Vec<String>> {
    match raw {
        Value::String(text) => Ok(split_keys(text)),
        Value::Array(values) => {
            let mut keys = Vec::with_capacity(values.len());
            for value in values {
                let key = value.as_str().ok_or_else(|| {
                    Error::invalid_parameter(KEYS, format!("expected string keys, got {}", value))
                })?;
                keys.extend(split_keys(key));
            }
            Ok(keys)
        }
        other => Err(Error::invalid_parameter(
            KEYS,
            format!("expected comma-separated text, got {}", other),
        )),
    }
}

/// Parse the `options` parameter into an options object. `null` is empty.
pub fn parse_options(raw: Value) -> Result<Record> {
    match parse_json_parameter(OPTIONS, raw)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Record::new()),
        other => Err(Error::invalid_parameter(
            OPTIONS,
            format!("expected a JSON object, got {}", other),
        )),
    }
}

/// Read the `query` parameter as text.
pub fn parse_query(raw: Value) -> Result<String> {
    match raw {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::invalid_parameter(
            QUERY,
            format!("expected text, got {}", other),
        )),
    }
}

/// Insert the derived key list into the options object.
///
/// The derived `keys` always replace any `keys` the options already carry.
pub fn merge_keys(mut options: Record, keys: &[String]) -> Record {
    options.insert(
        KEYS.to_string(),
        Value::Array(keys.iter().cloned().map(Value::String).collect()),
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_classify() {
        assert!(matches!(ItemsShape::classify(json!([1, 2])), ItemsShape::Array(_)));
        assert!(matches!(ItemsShape::classify(json!({"a": 1})), ItemsShape::Object(_)));
        assert!(matches!(ItemsShape::classify(json!("x")), ItemsShape::Scalar(_)));
        assert!(matches!(ItemsShape::classify(Value::Null), ItemsShape::Scalar(_)));
    }

    #[test]
    fn test_normalize_array_of_objects() {
        let records =
            normalize_items(json!(r#"[{"title": "Dune"}, {"title": "Emma"}, {"title": "Ulysses"}]"#))
                .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], record(json!({"title": "Emma"})));
    }

    #[test]
    fn test_normalize_scalar() {
        let records = normalize_items(json!("42")).unwrap();
        assert_eq!(records, vec![record(json!({"value": 42}))]);

        let records = normalize_items(json!(r#""hobbit""#)).unwrap();
        assert_eq!(records, vec![record(json!({"value": "hobbit"}))]);
    }

    #[test]
    fn test_normalize_single_object() {
        let records = normalize_items(json!(r#"{"title": "Dune"}"#)).unwrap();
        assert_eq!(records, vec![record(json!({"title": "Dune"}))]);
    }

    #[test]
    fn test_normalize_mixed_array() {
        let records = normalize_items(json!([{"title": "Dune"}, "Emma", null, [1]])).unwrap();
        assert_eq!(
            records,
            vec![
                record(json!({"title": "Dune"})),
                record(json!({"value": "Emma"})),
                record(json!({"value": null})),
                record(json!({"value": [1]})),
            ]
        );
    }

    #[test]
    fn test_normalize_structured_value() {
        let records = normalize_items(json!([{"title": "Dune"}])).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_normalize_malformed() {
        let err = normalize_items(json!("{not valid")).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("'items'"));
    }

    #[test]
    fn test_empty_items() {
        assert!(normalize_items(json!("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_split_keys() {
        assert_eq!(split_keys("title, author.name,,"), vec!["title", "author.name"]);
        assert_eq!(split_keys(" , ,"), Vec::<String>::new());
        assert_eq!(split_keys("value"), vec!["value"]);
    }

    #[test]
    fn test_parse_keys_shapes() {
        assert_eq!(parse_keys(&json!("a,b")).unwrap(), vec!["a", "b"]);
        assert_eq!(parse_keys(&json!([" a ", "b,c", ""])).unwrap(), vec!["a", "b", "c"]);
        assert!(parse_keys(&json!(3)).is_err());
        assert!(parse_keys(&json!([1])).is_err());
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(
            parse_options(json!(r#"{"threshold": 0.3}"#)).unwrap(),
            record(json!({"threshold": 0.3}))
        );
        assert!(parse_options(json!("null")).unwrap().is_empty());
        assert!(parse_options(json!("[1]")).is_err());
        assert!(parse_options(json!("{oops")).unwrap_err().is_parse());
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(parse_query(json!("hobbit")).unwrap(), "hobbit");
        assert_eq!(parse_query(json!(1965)).unwrap(), "1965");
        assert_eq!(parse_query(Value::Null).unwrap(), "");
        assert!(parse_query(json!({"q": 1})).is_err());
    }

    #[test]
    fn test_merge_keys_overrides() {
        let options = record(json!({"threshold": 0.4, "keys": ["ignored"]}));
        let merged = merge_keys(options, &["title".to_string(), "author.name".to_string()]);
        assert_eq!(
            merged,
            record(json!({"threshold": 0.4, "keys": ["title", "author.name"]}))
        );
    }

    #[test]
    fn test_merge_keys_inserts() {
        let merged = merge_keys(Record::new(), &["value".to_string()]);
        assert_eq!(merged, record(json!({"keys": ["value"]})));
    }
}
