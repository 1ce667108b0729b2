//! Feature values and rows.

use std::fmt;

use indexmap::IndexMap;

/// Compatible / incompatible / not applicable.
pub const COMPATIBLE: &str = "C";
pub const INCOMPATIBLE: &str = "I";
pub const NOT_APPLICABLE: &str = "NA";
pub const YES: &str = "Y";
pub const NO: &str = "N";

/// Declared type of a feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// One of a fixed list of labels.
    Nominal(&'static [&'static str]),
    Numeric,
}

/// Value of one feature for one pair.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Nominal(&'static str),
    Numeric(f64),
    /// Written as `?`.
    Missing,
}

impl FeatureValue {
    pub fn as_nominal(&self) -> Option<&'static str> {
        match self {
            FeatureValue::Nominal(label) => Some(*label),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            FeatureValue::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    /// `C` or `I`.
    pub fn compatible(yes: bool) -> Self {
        FeatureValue::Nominal(if yes { COMPATIBLE } else { INCOMPATIBLE })
    }

    /// `Y` or `N`.
    pub fn yes_no(yes: bool) -> Self {
        FeatureValue::Nominal(if yes { YES } else { NO })
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Nominal(label) => f.write_str(label),
            FeatureValue::Numeric(value) => write!(f, "{value}"),
            FeatureValue::Missing => f.write_str("?"),
        }
    }
}

/// Values of one instance, keyed by feature name in dispatch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    values: IndexMap<&'static str, FeatureValue>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: FeatureValue) {
        self.values.insert(name, value);
    }

    /// A value computed earlier in the same row.
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> + '_ {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FeatureValue::Numeric(3.0).to_string(), "3");
        assert_eq!(FeatureValue::Numeric(0.25).to_string(), "0.25");
        assert_eq!(FeatureValue::compatible(false).to_string(), "I");
        assert_eq!(FeatureValue::Missing.to_string(), "?");
    }

    #[test]
    fn test_row_keeps_insertion_order() {
        let mut row = FeatureRow::new();
        row.insert("SoonStr", FeatureValue::compatible(true));
        row.insert("DocNo", FeatureValue::Numeric(7.0));
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["SoonStr", "DocNo"]);
        assert_eq!(row.get("DocNo"), Some(&FeatureValue::Numeric(7.0)));
    }
}
