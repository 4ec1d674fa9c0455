//! Run specification types.
//!
//! A [`RunSpec`] is the JSON configuration file shape. Every field is
//! optional and overlays a base [`PageRankConfig`]; command-line flags are
//! applied on top of the result.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "damping": 0.85,
//!   "max_iterations": 500,
//!   "tolerance": 1e-10,
//!   "key_order": "numeric",
//!   "strategy": "pull",
//!   "parallel": true,
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::validation::{ValidationDiagnostic, ValidationReport};
use crate::errors::{RankError, Result};
use crate::types::{KeyOrder, PageRankConfig, Strategy};

/// Configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSpec {
    #[serde(default)]
    pub damping: Option<f64>,

    #[serde(default)]
    pub max_iterations: Option<usize>,

    #[serde(default)]
    pub tolerance: Option<f64>,

    #[serde(default)]
    pub key_order: Option<KeyOrder>,

    #[serde(default)]
    pub strategy: Option<Strategy>,

    #[serde(default)]
    pub parallel: Option<bool>,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl RunSpec {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RankError::Config(format!("invalid run spec: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RankError::Config(format!("cannot read run spec {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Overlay the fields that are set onto `base`.
    pub fn apply(&self, base: PageRankConfig) -> PageRankConfig {
        PageRankConfig {
            damping: self.damping.unwrap_or(base.damping),
            max_iterations: self.max_iterations.unwrap_or(base.max_iterations),
            tolerance: self.tolerance.unwrap_or(base.tolerance),
            key_order: self.key_order.unwrap_or(base.key_order),
            strategy: self.strategy.unwrap_or(base.strategy),
            parallel: self.parallel.unwrap_or(base.parallel),
        }
    }

    /// Diagnostics for unrecognized fields, sorted by name.
    pub fn unknown_field_report(&self) -> ValidationReport {
        let mut keys: Vec<&String> = self.unknown_fields.keys().collect();
        keys.sort();

        let diagnostics = keys
            .into_iter()
            .map(|key| {
                let path = format!("/{key}");
                let message = format!("unrecognized field \"{key}\"");
                let diag = if self.strict {
                    ValidationDiagnostic::error(path, message)
                } else {
                    ValidationDiagnostic::warning(path, message)
                };
                diag.with_hint("Check spelling or remove this field")
            })
            .collect();

        ValidationReport { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_spec() {
        let spec = RunSpec::from_json("{}").unwrap();
        assert!(spec.damping.is_none());
        assert!(!spec.strict);
        assert_eq!(spec.apply(PageRankConfig::default()), PageRankConfig::default());
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "damping": 0.5,
            "max_iterations": 42,
            "tolerance": 1e-8,
            "key_order": "lexicographic",
            "strategy": "pull",
            "parallel": true,
            "strict": true
        }"#;
        let cfg = RunSpec::from_json(json).unwrap().apply(PageRankConfig::default());
        assert_eq!(cfg.damping, 0.5);
        assert_eq!(cfg.max_iterations, 42);
        assert_eq!(cfg.tolerance, 1e-8);
        assert_eq!(cfg.key_order, KeyOrder::Lexicographic);
        assert_eq!(cfg.strategy, Strategy::Pull);
        assert!(cfg.parallel);
    }

    #[test]
    fn test_partial_spec_keeps_base() {
        let base = PageRankConfig::default().with_max_iterations(9);
        let cfg = RunSpec::from_json(r#"{ "damping": 0.6 }"#).unwrap().apply(base);
        assert_eq!(cfg.damping, 0.6);
        assert_eq!(cfg.max_iterations, 9);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let spec = RunSpec::from_json(r#"{ "dampening": 0.8, "alpha": 1 }"#).unwrap();
        let report = spec.unknown_field_report();
        assert_eq!(report.len(), 2);
        assert!(report.is_valid());
        assert_eq!(report.diagnostics[0].path, "/alpha");
    }

    #[test]
    fn test_unknown_fields_strict_is_error() {
        let spec = RunSpec::from_json(r#"{ "strict": true, "bogus": 1 }"#).unwrap();
        assert!(spec.unknown_field_report().has_errors());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = RunSpec::from_json("{ damping: }").unwrap_err();
        assert!(matches!(err, RankError::Config(_)));
    }
}
