//! Search configuration read from a pass-through options object.

use serde::Deserialize;
use serde_json::Value;

use super::capability::Record;
use crate::error::{Result, SearchError};

/// Search options.
///
/// Field names follow the camelCase keys of the options object. Unknown
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Dotted field paths to search
    pub keys: Vec<String>,
    /// Compare without lowercasing
    pub is_case_sensitive: bool,
    /// Maximum per-field distance counted as a match (0.0-1.0)
    pub threshold: f64,
    /// Sort results by ascending score
    pub should_sort: bool,
    /// Maximum results to return
    pub limit: Option<usize>,
    /// Queries shorter than this (in chars) match nothing
    pub min_match_char_length: usize,
    /// Disable field-length normalization
    pub ignore_field_norm: bool,
    /// Strength of field-length normalization
    pub field_norm_weight: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            is_case_sensitive: false,
            threshold: 0.6,
            should_sort: true,
            limit: None,
            min_match_char_length: 1,
            ignore_field_norm: false,
            field_norm_weight: 1.0,
        }
    }
}

impl SearchOptions {
    /// Default options searching the given keys.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Read options from a configuration object and validate them.
    pub fn from_config(config: &Record) -> Result<Self> {
        let options: Self = serde_json::from_value(Value::Object(config.clone()))?;
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::InvalidConfig(format!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            )));
        }
        if !self.field_norm_weight.is_finite() || self.field_norm_weight < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "fieldNormWeight must be a non-negative number, got {}",
                self.field_norm_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults_from_empty_object() {
        let options = SearchOptions::from_config(&Record::new()).unwrap();
        assert_eq!(options, SearchOptions::default());
        assert_eq!(options.threshold, 0.6);
        assert!(options.should_sort);
    }

    #[test]
    fn test_camel_case_fields() {
        let options = SearchOptions::from_config(&config(json!({
            "keys": ["title"],
            "isCaseSensitive": true,
            "threshold": 0.3,
            "shouldSort": false,
            "limit": 5,
            "minMatchCharLength": 2,
            "ignoreFieldNorm": true,
        })))
        .unwrap();

        assert_eq!(options.keys, vec!["title"]);
        assert!(options.is_case_sensitive);
        assert_eq!(options.threshold, 0.3);
        assert!(!options.should_sort);
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.min_match_char_length, 2);
        assert!(options.ignore_field_norm);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let options = SearchOptions::from_config(&config(json!({
            "includeScore": true,
            "useExtendedSearch": false,
        })))
        .unwrap();
        assert_eq!(options, SearchOptions::default());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = SearchOptions::from_config(&config(json!({"threshold": "low"}))).unwrap_err();
        assert!(matches!(err, SearchError::Options(_)));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = SearchOptions::from_config(&config(json!({"threshold": 1.5}))).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
    }
}
