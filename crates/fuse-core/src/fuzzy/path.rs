//! Dotted key paths into JSON records.

use serde_json::Value;

use super::capability::Record;

/// A parsed dotted path such as `author.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(key: &str) -> Self {
        Self {
            segments: key.split('.').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Collect the searchable text at this path.
    ///
    /// Arrays met along the path are flattened. Strings, numbers and
    /// booleans become text; null and nested objects at the leaf are skipped.
    pub fn resolve(&self, record: &Record) -> Vec<String> {
        let mut out = Vec::new();
        if let Some((first, rest)) = self.segments.split_first() {
            if let Some(value) = record.get(first) {
                collect(value, rest, &mut out);
            }
        }
        out
    }
}

fn collect(value: &Value, rest: &[String], out: &mut Vec<String>) {
    match (value, rest.split_first()) {
        (Value::Array(values), _) => {
            for v in values {
                collect(v, rest, out);
            }
        }
        (Value::Object(map), Some((next, tail))) => {
            if let Some(v) = map.get(next) {
                collect(v, tail, out);
            }
        }
        (Value::String(s), None) => out.push(s.clone()),
        (Value::Number(n), None) => out.push(n.to_string()),
        (Value::Bool(b), None) => out.push(b.to_string()),
        _ => {}
    }
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
    fn test_top_level_key() {
        let r = record(json!({"title": "Dune"}));
        assert_eq!(KeyPath::parse("title").resolve(&r), vec!["Dune"]);
    }

    #[test]
    fn test_nested_key() {
        let r = record(json!({"author": {"name": "Frank Herbert"}}));
        let path = KeyPath::parse("author.name");
        assert_eq!(path.segments(), ["author", "name"]);
        assert_eq!(path.resolve(&r), vec!["Frank Herbert"]);
    }

    #[test]
    fn test_arrays_flattened() {
        let r = record(json!({
            "authors": [{"name": "Terry Pratchett"}, {"name": "Neil Gaiman"}],
            "tags": ["fantasy", "humor"],
        }));
        assert_eq!(
            KeyPath::parse("authors.name").resolve(&r),
            vec!["Terry Pratchett", "Neil Gaiman"]
        );
        assert_eq!(KeyPath::parse("tags").resolve(&r), vec!["fantasy", "humor"]);
    }

    #[test]
    fn test_scalars_become_text() {
        let r = record(json!({"year": 1965, "available": true, "missing": null}));
        assert_eq!(KeyPath::parse("year").resolve(&r), vec!["1965"]);
        assert_eq!(KeyPath::parse("available").resolve(&r), vec!["true"]);
        assert!(KeyPath::parse("missing").resolve(&r).is_empty());
    }

    #[test]
    fn test_missing_path() {
        let r = record(json!({"title": "Dune"}));
        assert!(KeyPath::parse("author.name").resolve(&r).is_empty());
        assert!(KeyPath::parse("title.length").resolve(&r).is_empty());
    }
}
