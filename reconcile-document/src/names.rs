//! Canonical annotation set names and their on-disk mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Candidate mentions.
pub const NPS: &str = "nps";
/// Gold-standard mentions carrying `ID`/`REF` chain links.
pub const GOLD_NPS: &str = "gsNPs";
/// One span per token, type is the POS tag.
pub const POSTAG: &str = "postag";
/// Constituency parse nodes, type is the label.
pub const PARSE: &str = "parse";
/// Dependency relations over dependents, type is the relation.
pub const DEP: &str = "dep";
/// Named entities, type is the entity class.
pub const NE: &str = "ne";
pub const SENTENCE: &str = "sentence";
pub const PARAGRAPH: &str = "paragraph";
/// Resolved coreference chains produced by a clusterer.
pub const COREF: &str = "coref";
/// In-memory marker carrying the document number.
pub const DOC_NO: &str = "docNo";

/// Config-driven remapping of logical set names to on-disk names.
///
/// A name without an entry maps to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetNameMap {
    names: BTreeMap<String, String>,
}

impl SetNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `logical` to `on_disk`.
    pub fn with(mut self, logical: impl Into<String>, on_disk: impl Into<String>) -> Self {
        self.insert(logical, on_disk);
        self
    }

    pub fn insert(&mut self, logical: impl Into<String>, on_disk: impl Into<String>) {
        self.names.insert(logical.into(), on_disk.into());
    }

    /// Resolve a logical name to the name used for caching and storage.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for SetNameMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_falls_back_to_itself() {
        let names = SetNameMap::new().with(NPS, "Cogniac.nps");
        assert_eq!(names.canonical(NPS), "Cogniac.nps");
        assert_eq!(names.canonical(POSTAG), POSTAG);
    }
}
