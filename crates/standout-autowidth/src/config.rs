//! Tunable constants for width estimation.
//!
//! Every number and key list the heuristic relies on lives in [`WidthConfig`].
//! The defaults reproduce the stock behavior; deployments whose row schema
//! uses different quantity fields can supply their own lists from YAML or JSON.
//!
//! ```yaml
//! char_width: 9.0
//! min_width: 100
//! aggregatable_keys: [pieces, weight]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Field names whose numeric values are summed when a cell holds a list of items.
pub const DEFAULT_AGGREGATABLE_KEYS: &[&str] = &[
    "quantity",
    "qty",
    "amount",
    "total",
    "totalQuantity",
    "balance",
    "qtyRolls",
    "rolls",
    "totalRolls",
    "orderedQty",
    "receivedQty",
    "issuedQty",
    "returnedQty",
    "availableQty",
];

/// Field names that best describe an object, in priority order.
pub const DEFAULT_DESCRIPTIVE_KEYS: &[&str] = &[
    "label",
    "name",
    "title",
    "code",
    "number",
    "value",
    "status",
    "description",
];

/// Constants driving cell normalization and width estimation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidthConfig {
    /// Estimated pixel width of one character.
    pub char_width: f64,
    /// Pixels added to every column for cell padding and sort icons.
    pub padding: f64,
    /// Width floor applied to every column.
    pub min_width: u32,
    /// Quantity-like keys summed across arrays of objects. First match wins.
    pub aggregatable_keys: Vec<String>,
    /// Keys that describe an object, checked in order.
    pub descriptive_keys: Vec<String>,
    /// Case-insensitive substring of an aggregated key that triggers the suffix.
    pub roll_marker: String,
    /// Suffix appended to sums of roll-counting keys.
    pub roll_suffix: String,
    /// `chrono` format string used for date values.
    pub date_format: String,
    /// How many scalar fields an object without descriptive keys contributes.
    pub summary_field_limit: usize,
}

impl Default for WidthConfig {
    fn default() -> Self {
        WidthConfig {
            char_width: 8.5,
            padding: 32.0,
            min_width: 80,
            aggregatable_keys: DEFAULT_AGGREGATABLE_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            descriptive_keys: DEFAULT_DESCRIPTIVE_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            roll_marker: "roll".to_string(),
            roll_suffix: " rolls".to_string(),
            date_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
            summary_field_limit: 2,
        }
    }
}

impl WidthConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: WidthConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: WidthConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    /// Check that the numeric constants can produce a sensible width.
    pub fn validate(&self) -> Result<()> {
        if !self.char_width.is_finite() || self.char_width <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "char_width",
                reason: format!("must be a positive number, got {}", self.char_width),
            });
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConfigError::Invalid {
                field: "padding",
                reason: format!("must be zero or positive, got {}", self.padding),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_stock_heuristic() {
        let config = WidthConfig::default();
        assert_eq!(config.char_width, 8.5);
        assert_eq!(config.padding, 32.0);
        assert_eq!(config.min_width, 80);
        assert_eq!(config.descriptive_keys[0], "label");
        assert_eq!(config.descriptive_keys[1], "name");
        assert!(config.aggregatable_keys.iter().any(|k| k == "quantity"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = WidthConfig::from_yaml_str("min_width: 120\nchar_width: 7\n").unwrap();
        assert_eq!(config.min_width, 120);
        assert_eq!(config.char_width, 7.0);
        assert_eq!(config.padding, 32.0);
        assert_eq!(config.roll_suffix, " rolls");
    }

    #[test]
    fn json_overrides_key_lists() {
        let config =
            WidthConfig::from_json_str(r#"{"aggregatable_keys": ["pieces"]}"#).unwrap();
        assert_eq!(config.aggregatable_keys, vec!["pieces".to_string()]);
    }

    #[test]
    fn rejects_non_positive_char_width() {
        let err = WidthConfig::from_yaml_str("char_width: 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "char_width",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_padding() {
        let err = WidthConfig::from_json_str(r#"{"padding": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "padding", .. }));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = WidthConfig::from_yaml_str("min_width: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn loads_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "padding: 16").unwrap();
        let config = WidthConfig::from_path(file.path()).unwrap();
        assert_eq!(config.padding, 16.0);
    }

    #[test]
    fn loads_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"min_width": 64}}"#).unwrap();
        let config = WidthConfig::from_path(file.path()).unwrap();
        assert_eq!(config.min_width, 64);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WidthConfig::from_path(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
