//! Per-document directory layout.
//!
//! ```text
//! <root>/raw.txt
//! <root>/meta.ron
//! <root>/annotations/<set name>
//! <root>/features/<feature set>/features.arff
//! <root>/predictions/<feature set>/<classifier>/<model>/predictions
//! <root>/clusters/<feature set>/<classifier>/<model>/<clusterer>/coref
//! ```

use std::path::{Path, PathBuf};

pub const RAW_TEXT_FILE: &str = "raw.txt";
pub const METADATA_FILE: &str = "meta.ron";
pub const ANNOTATIONS_DIR: &str = "annotations";
pub const FEATURES_DIR: &str = "features";
pub const PREDICTIONS_DIR: &str = "predictions";
pub const CLUSTERS_DIR: &str = "clusters";
pub const FEATURE_FILE: &str = "features.arff";
pub const PREDICTION_FILE: &str = "predictions";

/// Paths of every artifact belonging to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    root: PathBuf,
}

impl DocumentLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_text(&self) -> PathBuf {
        self.root.join(RAW_TEXT_FILE)
    }

    pub fn metadata(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    pub fn annotations_dir(&self) -> PathBuf {
        self.root.join(ANNOTATIONS_DIR)
    }

    /// File holding the set stored under `canonical_name`.
    pub fn annotation_file(&self, canonical_name: &str) -> PathBuf {
        self.annotations_dir().join(canonical_name)
    }

    pub fn features_dir(&self, feature_set: &str) -> PathBuf {
        self.root.join(FEATURES_DIR).join(feature_set)
    }

    pub fn feature_file(&self, feature_set: &str) -> PathBuf {
        self.features_dir(feature_set).join(FEATURE_FILE)
    }

    pub fn predictions_dir(&self, feature_set: &str, classifier: &str, model: &str) -> PathBuf {
        self.root
            .join(PREDICTIONS_DIR)
            .join(feature_set)
            .join(classifier)
            .join(model)
    }

    pub fn prediction_file(&self, feature_set: &str, classifier: &str, model: &str) -> PathBuf {
        self.predictions_dir(feature_set, classifier, model)
            .join(PREDICTION_FILE)
    }

    pub fn clusters_dir(
        &self,
        feature_set: &str,
        classifier: &str,
        model: &str,
        clusterer: &str,
    ) -> PathBuf {
        self.root
            .join(CLUSTERS_DIR)
            .join(feature_set)
            .join(classifier)
            .join(model)
            .join(clusterer)
    }

    /// Directories removed by a clean; raw text and metadata survive.
    pub fn derived_dirs(&self) -> [PathBuf; 4] {
        [
            self.annotations_dir(),
            self.root.join(FEATURES_DIR),
            self.root.join(PREDICTIONS_DIR),
            self.root.join(CLUSTERS_DIR),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths() {
        let layout = DocumentLayout::new("/corpus/doc1");
        assert_eq!(layout.raw_text(), Path::new("/corpus/doc1/raw.txt"));
        assert_eq!(
            layout.prediction_file("soon", "baseline", "m1"),
            Path::new("/corpus/doc1/predictions/soon/baseline/m1/predictions")
        );
        assert_eq!(
            layout.clusters_dir("soon", "baseline", "m1", "SingleLink"),
            Path::new("/corpus/doc1/clusters/soon/baseline/m1/SingleLink")
        );
    }
}
