//! ARFF feature files.
//!
//! ```text
//! @RELATION reconcile
//!
//! @ATTRIBUTE ID1 NUMERIC
//! @ATTRIBUTE SoonStr {C,I}
//!
//! @DATA
//! 1,C
//! ```

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use reconcile::AnnotationId;
use tracing::debug;

use crate::{FeatureError, FeatureKind, FeatureResult, FeatureRow, FeatureSet, FeatureValue};

/// Name of the label column, never binarized.
pub const CLASS_ATTRIBUTE: &str = "class";

// ============================================================================
// Writers
// ============================================================================

/// Serializes instances of a feature set.
pub trait FeatureWriter {
    fn name(&self) -> &'static str;

    fn write_header(
        &self,
        out: &mut dyn Write,
        relation: &str,
        features: &FeatureSet,
    ) -> io::Result<()>;

    fn write_row(&self, out: &mut dyn Write, features: &FeatureSet, row: &FeatureRow)
        -> io::Result<()>;
}

fn value_of<'r>(row: &'r FeatureRow, name: &str) -> Option<&'r FeatureValue> {
    row.get(name)
}

/// One column per feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainArffWriter;

impl FeatureWriter for PlainArffWriter {
    fn name(&self) -> &'static str {
        "PlainArff"
    }

    fn write_header(
        &self,
        out: &mut dyn Write,
        relation: &str,
        features: &FeatureSet,
    ) -> io::Result<()> {
        writeln!(out, "@RELATION {relation}")?;
        writeln!(out)?;
        for feature in features.iter() {
            match feature.kind() {
                FeatureKind::Numeric => writeln!(out, "@ATTRIBUTE {} NUMERIC", feature.name())?,
                FeatureKind::Nominal(labels) => {
                    writeln!(out, "@ATTRIBUTE {} {{{}}}", feature.name(), labels.join(","))?
                }
            }
        }
        writeln!(out)?;
        writeln!(out, "@DATA")
    }

    fn write_row(
        &self,
        out: &mut dyn Write,
        features: &FeatureSet,
        row: &FeatureRow,
    ) -> io::Result<()> {
        let cells: Vec<String> = features
            .iter()
            .map(|feature| {
                value_of(row, feature.name())
                    .unwrap_or(&FeatureValue::Missing)
                    .to_string()
            })
            .collect();
        writeln!(out, "{}", cells.join(","))
    }
}

/// Nominal features expanded into one 0/1 column per label.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarizedArffWriter;

impl FeatureWriter for BinarizedArffWriter {
    fn name(&self) -> &'static str {
        "BinarizedArff"
    }

    fn write_header(
        &self,
        out: &mut dyn Write,
        relation: &str,
        features: &FeatureSet,
    ) -> io::Result<()> {
        writeln!(out, "@RELATION {relation}")?;
        writeln!(out)?;
        for feature in features.iter() {
            match feature.kind() {
                FeatureKind::Nominal(labels) if feature.name() != CLASS_ATTRIBUTE => {
                    for label in labels {
                        writeln!(out, "@ATTRIBUTE {}_{} NUMERIC", feature.name(), label)?;
                    }
                }
                FeatureKind::Nominal(labels) => {
                    writeln!(out, "@ATTRIBUTE {} {{{}}}", feature.name(), labels.join(","))?
                }
                FeatureKind::Numeric => writeln!(out, "@ATTRIBUTE {} NUMERIC", feature.name())?,
            }
        }
        writeln!(out)?;
        writeln!(out, "@DATA")
    }

    fn write_row(
        &self,
        out: &mut dyn Write,
        features: &FeatureSet,
        row: &FeatureRow,
    ) -> io::Result<()> {
        let mut cells = Vec::new();
        for feature in features.iter() {
            let value = value_of(row, feature.name()).unwrap_or(&FeatureValue::Missing);
            match feature.kind() {
                FeatureKind::Nominal(labels) if feature.name() != CLASS_ATTRIBUTE => {
                    for label in labels {
                        cells.push(match value {
                            FeatureValue::Missing => "?".to_string(),
                            other if other.as_nominal() == Some(*label) => "1".to_string(),
                            _ => "0".to_string(),
                        });
                    }
                }
                _ => cells.push(value.to_string()),
            }
        }
        writeln!(out, "{}", cells.join(","))
    }
}

/// Construct a writer by its configured name.
pub fn feature_writer(name: &str) -> FeatureResult<Box<dyn FeatureWriter>> {
    match name {
        "PlainArff" => Ok(Box::new(PlainArffWriter)),
        "BinarizedArff" => Ok(Box::new(BinarizedArffWriter)),
        other => Err(FeatureError::UnknownWriter(other.to_string())),
    }
}

/// Write a complete feature file, creating parent directories.
pub fn write_feature_file(
    path: &Path,
    writer: &dyn FeatureWriter,
    relation: &str,
    features: &FeatureSet,
    rows: &[FeatureRow],
) -> FeatureResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(FeatureError::io(parent))?;
    }
    let file = fs::File::create(path).map_err(FeatureError::io(path))?;
    let mut out = BufWriter::new(file);
    writer
        .write_header(&mut out, relation, features)
        .map_err(FeatureError::io(path))?;
    for row in rows {
        writer
            .write_row(&mut out, features, row)
            .map_err(FeatureError::io(path))?;
    }
    out.flush().map_err(FeatureError::io(path))?;
    debug!(path = %path.display(), rows = rows.len(), writer = writer.name(), "wrote feature file");
    Ok(())
}

// ============================================================================
// Reader
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Numeric,
    Nominal(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

/// A feature file read back into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureTable {
    pub relation: String,
    pub attributes: Vec<Attribute>,
    pub rows: Vec<Vec<String>>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name == name)
    }

    /// Cell of `row` under attribute `name`.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let column = self.column(name)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// The `(ID1, ID2)` mention ids of every instance.
    pub fn pair_ids(&self) -> FeatureResult<Vec<(AnnotationId, AnnotationId)>> {
        let first = self
            .column("ID1")
            .ok_or_else(|| FeatureError::MissingAttribute("ID1".to_string()))?;
        let second = self
            .column("ID2")
            .ok_or_else(|| FeatureError::MissingAttribute("ID2".to_string()))?;
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let parse = |cell: &str| {
                    cell.parse::<f64>()
                        .ok()
                        .filter(|id| *id >= 0.0 && id.fract() == 0.0)
                        .map(|id| id as AnnotationId)
                        .ok_or_else(|| FeatureError::Arff {
                            path: self.relation.clone(),
                            line: idx + 1,
                            message: format!("bad mention id '{cell}'"),
                        })
                };
                Ok((parse(&row[first])?, parse(&row[second])?))
            })
            .collect()
    }
}

/// Read a feature file.
pub fn read_arff(path: &Path) -> FeatureResult<FeatureTable> {
    let text = fs::read_to_string(path).map_err(FeatureError::io(path))?;
    parse_arff(&text, &path.display().to_string())
}

/// Parse feature-file text; `source` names it in errors.
pub fn parse_arff(text: &str, source: &str) -> FeatureResult<FeatureTable> {
    let mut table = FeatureTable::default();
    let mut in_data = false;
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let error = |message: String| FeatureError::Arff {
            path: source.to_string(),
            line: idx + 1,
            message,
        };
        if in_data {
            let cells: Vec<String> = line.split(',').map(|cell| cell.trim().to_string()).collect();
            if cells.len() != table.attributes.len() {
                return Err(error(format!(
                    "expected {} values, found {}",
                    table.attributes.len(),
                    cells.len()
                )));
            }
            table.rows.push(cells);
            continue;
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match keyword.to_ascii_uppercase().as_str() {
            "@RELATION" => table.relation = rest.trim().to_string(),
            "@ATTRIBUTE" => {
                let (name, kind) = rest
                    .trim()
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| error("attribute without a type".to_string()))?;
                let kind = kind.trim();
                let kind = if let Some(labels) =
                    kind.strip_prefix('{').and_then(|k| k.strip_suffix('}'))
                {
                    AttributeKind::Nominal(
                        labels.split(',').map(|label| label.trim().to_string()).collect(),
                    )
                } else if matches!(
                    kind.to_ascii_uppercase().as_str(),
                    "NUMERIC" | "REAL" | "INTEGER"
                ) {
                    AttributeKind::Numeric
                } else {
                    return Err(error(format!("unsupported attribute type '{kind}'")));
                };
                table.attributes.push(Attribute {
                    name: name.to_string(),
                    kind,
                });
            }
            "@DATA" => in_data = true,
            _ => return Err(error(format!("unexpected line '{line}'"))),
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{ClassLabel, Id1, Id2, SoonStr};
    use crate::FeatureSet;

    fn features() -> FeatureSet {
        FeatureSet::new(vec![
            Box::new(Id1),
            Box::new(Id2),
            Box::new(SoonStr),
            Box::new(ClassLabel),
        ])
    }

    fn rows() -> Vec<FeatureRow> {
        let mut first = FeatureRow::new();
        first.insert("ID1", FeatureValue::Numeric(1.0));
        first.insert("ID2", FeatureValue::Numeric(2.0));
        first.insert("SoonStr", FeatureValue::compatible(true));
        first.insert("class", FeatureValue::Nominal("+"));
        let mut second = FeatureRow::new();
        second.insert("ID1", FeatureValue::Numeric(2.0));
        second.insert("ID2", FeatureValue::Numeric(3.0));
        second.insert("SoonStr", FeatureValue::Missing);
        second.insert("class", FeatureValue::Nominal("-"));
        vec![first, second]
    }

    fn render(writer: &dyn FeatureWriter) -> String {
        let features = features();
        let mut out = Vec::new();
        writer.write_header(&mut out, "reconcile", &features).unwrap();
        for row in rows() {
            writer.write_row(&mut out, &features, &row).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_writer() {
        insta::assert_snapshot!(render(&PlainArffWriter), @r###"
        @RELATION reconcile

        @ATTRIBUTE ID1 NUMERIC
        @ATTRIBUTE ID2 NUMERIC
        @ATTRIBUTE SoonStr {C,I}
        @ATTRIBUTE class {+,-}

        @DATA
        1,2,C,+
        2,3,?,-
        "###);
    }

    #[test]
    fn test_binarized_writer() {
        insta::assert_snapshot!(render(&BinarizedArffWriter), @r###"
        @RELATION reconcile

        @ATTRIBUTE ID1 NUMERIC
        @ATTRIBUTE ID2 NUMERIC
        @ATTRIBUTE SoonStr_C NUMERIC
        @ATTRIBUTE SoonStr_I NUMERIC
        @ATTRIBUTE class {+,-}

        @DATA
        1,2,1,0,+
        2,3,?,?,-
        "###);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features/soon/features.arff");
        write_feature_file(&path, &PlainArffWriter, "reconcile", &features(), &rows()).unwrap();

        let table = read_arff(&path).unwrap();
        assert_eq!(table.relation, "reconcile");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.attributes[2].kind,
            AttributeKind::Nominal(vec!["C".to_string(), "I".to_string()])
        );
        assert_eq!(table.value(0, "class"), Some("+"));
        assert_eq!(table.pair_ids().unwrap(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let text = "@RELATION r\n@ATTRIBUTE a NUMERIC\n@ATTRIBUTE b NUMERIC\n@DATA\n1,2\n3\n";
        let err = parse_arff(text, "bad.arff").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"bad.arff:6: expected 2 values, found 1");
    }

    #[test]
    fn test_unknown_writer() {
        assert!(matches!(
            feature_writer("Csv"),
            Err(FeatureError::UnknownWriter(name)) if name == "Csv"
        ));
    }
}
