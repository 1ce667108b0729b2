//! System configuration.
//!
//! ```toml
//! feature_set = "soon"
//! features = ["DocNo", "ID1", "ID2", "SoonStr", "class"]
//! pair_generator = "Soon"
//! writer = "PlainArff"
//! classifier = "SoonStrBaseline"
//! model = "baseline"
//! clusterer = "SingleLink"
//! threshold = 0.5
//! training = false
//!
//! [set_names]
//! nps = "Cogniac.nps"
//! ```
//!
//! Optional parameters are only checked where a stage needs them.

use std::fs;
use std::path::Path;

use reconcile_document::SetNameMap;
use reconcile_features::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};

use crate::{PipelineError, PipelineResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Directory name under `features/` and the rest of the layout.
    #[serde(default)]
    pub feature_set: Option<String>,
    /// Feature names, in column order.
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub pair_generator: Option<String>,
    /// Sentence window for the `Windowed` generator.
    #[serde(default)]
    pub window: Option<i64>,
    #[serde(default = "default_writer")]
    pub writer: String,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub clusterer: Option<String>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Training runs draw pairs and labels from gold chains and stop after
    /// feature extraction.
    #[serde(default)]
    pub training: bool,
    #[serde(default)]
    pub set_names: SetNameMap,
}

fn default_writer() -> String {
    "PlainArff".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            feature_set: None,
            features: Vec::new(),
            pair_generator: None,
            window: None,
            writer: default_writer(),
            classifier: None,
            model: None,
            clusterer: None,
            threshold: DEFAULT_THRESHOLD,
            training: false,
            set_names: SetNameMap::default(),
        }
    }
}

fn required<'a>(value: &'a Option<String>, parameter: &str) -> PipelineResult<&'a str> {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| PipelineError::missing(parameter))
}

impl SystemConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Parse TOML text; `source` names it in errors.
    pub fn from_toml(content: &str, source: &str) -> PipelineResult<Self> {
        toml::from_str(content).map_err(|e| PipelineError::ConfigFile {
            path: source.to_string(),
            source: e,
        })
    }

    pub fn feature_set(&self) -> PipelineResult<&str> {
        required(&self.feature_set, "feature_set")
    }

    pub fn pair_generator(&self) -> PipelineResult<&str> {
        required(&self.pair_generator, "pair_generator")
    }

    pub fn classifier(&self) -> PipelineResult<&str> {
        required(&self.classifier, "classifier")
    }

    pub fn model(&self) -> PipelineResult<&str> {
        required(&self.model, "model")
    }

    pub fn clusterer(&self) -> PipelineResult<&str> {
        required(&self.clusterer, "clusterer")
    }

    /// The feature list, which must not be empty.
    pub fn features(&self) -> PipelineResult<&[String]> {
        if self.features.is_empty() {
            return Err(PipelineError::missing("features"));
        }
        Ok(&self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconcile_document::names;

    #[test]
    fn test_parse_full_config() {
        let config = SystemConfig::from_toml(
            r#"
            feature_set = "soon"
            features = ["SoonStr", "class"]
            pair_generator = "Windowed"
            window = 2
            classifier = "SoonStrBaseline"
            clusterer = "BestFirst"
            threshold = 0.7
            training = true

            [set_names]
            nps = "Cogniac.nps"
            "#,
            "system.toml",
        )
        .unwrap();
        assert_eq!(config.feature_set().unwrap(), "soon");
        assert_eq!(config.window, Some(2));
        assert_eq!(config.writer, "PlainArff");
        assert_eq!(config.threshold, 0.7);
        assert!(config.training);
        assert_eq!(config.set_names.canonical(names::NPS), "Cogniac.nps");
    }

    #[test]
    fn test_missing_parameter_reported_at_use() {
        let config = SystemConfig::from_toml("feature_set = \"soon\"\n", "system.toml").unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        let err = config.clusterer().unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"configuration error: missing required parameter 'clusterer'");
        assert!(matches!(config.features(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_bad_toml() {
        let err = SystemConfig::from_toml("threshold = \"high\"\n", "system.toml").unwrap_err();
        assert!(matches!(err, PipelineError::ConfigFile { path, .. } if path == "system.toml"));
    }
}
