//! Classifier contract.
//!
//! A classifier scores every instance of a feature table; a score of at
//! least the clustering threshold means "coreferent".

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::value::COMPATIBLE;
use crate::{FeatureError, FeatureResult, FeatureTable};

pub trait Classifier {
    fn name(&self) -> &'static str;

    /// One score in `[0, 1]` per row of `table`.
    fn test(&self, table: &FeatureTable) -> FeatureResult<Vec<f64>>;
}

/// Links exactly the pairs whose `SoonStr` feature is compatible.
///
/// Reads the plain `SoonStr` column or, in binarized files, `SoonStr_C`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoonStrBaseline;

impl Classifier for SoonStrBaseline {
    fn name(&self) -> &'static str {
        "SoonStrBaseline"
    }

    fn test(&self, table: &FeatureTable) -> FeatureResult<Vec<f64>> {
        let positive = |cell: &str| if cell == "1" || cell == COMPATIBLE { 1.0 } else { 0.0 };
        let column = table
            .column("SoonStr")
            .or_else(|| table.column("SoonStr_C"))
            .ok_or_else(|| FeatureError::MissingAttribute("SoonStr".to_string()))?;
        Ok(table.rows.iter().map(|row| positive(&row[column])).collect())
    }
}

/// Scores produced by an external learner, one number per line.
#[derive(Debug, Clone)]
pub struct PredictionFileClassifier {
    path: PathBuf,
}

impl PredictionFileClassifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Classifier for PredictionFileClassifier {
    fn name(&self) -> &'static str {
        "PredictionFile"
    }

    fn test(&self, table: &FeatureTable) -> FeatureResult<Vec<f64>> {
        let scores = read_predictions(&self.path)?;
        if scores.len() != table.len() {
            return Err(FeatureError::PredictionCount {
                expected: table.len(),
                found: scores.len(),
            });
        }
        Ok(scores)
    }
}

/// Read one score per non-empty line.
pub fn read_predictions(path: &Path) -> FeatureResult<Vec<f64>> {
    let text = fs::read_to_string(path).map_err(FeatureError::io(path))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            line.trim()
                .parse::<f64>()
                .map_err(|_| FeatureError::BadPrediction {
                    line: idx + 1,
                    value: line.trim().to_string(),
                })
        })
        .collect()
}

/// Write one score per line, creating parent directories.
pub fn write_predictions(path: &Path, scores: &[f64]) -> FeatureResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(FeatureError::io(parent))?;
    }
    let mut out = String::new();
    for score in scores {
        let _ = writeln!(out, "{score}");
    }
    fs::write(path, out).map_err(FeatureError::io(path))?;
    debug!(path = %path.display(), scores = scores.len(), "wrote predictions");
    Ok(())
}

/// Construct a classifier by its configured name.
///
/// `PredictionFile` reads from `predictions`, the document's prediction file.
pub fn classifier_by_name(name: &str, predictions: &Path) -> FeatureResult<Box<dyn Classifier>> {
    match name {
        "SoonStrBaseline" => Ok(Box::new(SoonStrBaseline)),
        "PredictionFile" => Ok(Box::new(PredictionFileClassifier::new(predictions))),
        other => Err(FeatureError::UnknownClassifier(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_arff;

    const PLAIN: &str = "\
@RELATION r
@ATTRIBUTE ID1 NUMERIC
@ATTRIBUTE ID2 NUMERIC
@ATTRIBUTE SoonStr {C,I}
@DATA
1,2,C
1,3,I
2,3,?
";

    #[test]
    fn test_baseline_reads_plain_and_binarized() {
        let plain = parse_arff(PLAIN, "plain").unwrap();
        assert_eq!(SoonStrBaseline.test(&plain).unwrap(), vec![1.0, 0.0, 0.0]);

        let binarized = parse_arff(
            "@RELATION r\n@ATTRIBUTE SoonStr_C NUMERIC\n@ATTRIBUTE SoonStr_I NUMERIC\n@DATA\n0,1\n1,0\n",
            "binarized",
        )
        .unwrap();
        assert_eq!(SoonStrBaseline.test(&binarized).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_baseline_needs_soon_str() {
        let table = parse_arff("@RELATION r\n@ATTRIBUTE ID1 NUMERIC\n@DATA\n1\n", "t").unwrap();
        assert!(matches!(
            SoonStrBaseline.test(&table),
            Err(FeatureError::MissingAttribute(name)) if name == "SoonStr"
        ));
    }

    #[test]
    fn test_prediction_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions/soon/baseline/m1/predictions");
        write_predictions(&path, &[0.25, 1.0, 0.0]).unwrap();
        insta::assert_snapshot!(fs::read_to_string(&path).unwrap(), @r###"
        0.25
        1
        0
        "###);

        let table = parse_arff(PLAIN, "plain").unwrap();
        let classifier = classifier_by_name("PredictionFile", &path).unwrap();
        assert_eq!(classifier.test(&table).unwrap(), vec![0.25, 1.0, 0.0]);
    }

    #[test]
    fn test_prediction_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions");
        fs::write(&path, "0.5\n").unwrap();
        let table = parse_arff(PLAIN, "plain").unwrap();
        let err = PredictionFileClassifier::new(&path).test(&table).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"expected 3 predictions, found 1");
    }

    #[test]
    fn test_bad_prediction_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions");
        fs::write(&path, "0.5\nyes\n").unwrap();
        let err = read_predictions(&path).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"bad prediction 'yes' on line 2");
    }
}
