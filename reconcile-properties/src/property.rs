//! The property abstraction.

use std::fmt;

use reconcile::{Annotation, AnnotationSet, SpanKey};
use reconcile_document::Document;

use crate::{PropertyEngine, PropertyResult, PropertyValue};

/// Every property known to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyId {
    Words,
    HeadNoun,
    HeadPos,
    Pronoun,
    Person,
    Definite,
    Indefinite,
    Demonstrative,
    ProperName,
    ProperNameType,
    WnSemClass,
    NpSemanticType,
    Number,
    Gender,
    Animacy,
    GramRole,
    Conjunction,
    Embedded,
    MaximalNp,
    SentNum,
    ParNum,
    CorefId,
    InQuote,
    Author,
    CompAuthor,
    NoDetText,
}

impl PropertyId {
    pub const ALL: [PropertyId; 26] = [
        PropertyId::Words,
        PropertyId::HeadNoun,
        PropertyId::HeadPos,
        PropertyId::Pronoun,
        PropertyId::Person,
        PropertyId::Definite,
        PropertyId::Indefinite,
        PropertyId::Demonstrative,
        PropertyId::ProperName,
        PropertyId::ProperNameType,
        PropertyId::WnSemClass,
        PropertyId::NpSemanticType,
        PropertyId::Number,
        PropertyId::Gender,
        PropertyId::Animacy,
        PropertyId::GramRole,
        PropertyId::Conjunction,
        PropertyId::Embedded,
        PropertyId::MaximalNp,
        PropertyId::SentNum,
        PropertyId::ParNum,
        PropertyId::CorefId,
        PropertyId::InQuote,
        PropertyId::Author,
        PropertyId::CompAuthor,
        PropertyId::NoDetText,
    ];

    /// Name used in configuration and logs.
    pub fn name(self) -> &'static str {
        match self {
            PropertyId::Words => "Words",
            PropertyId::HeadNoun => "HeadNoun",
            PropertyId::HeadPos => "HeadPos",
            PropertyId::Pronoun => "Pronoun",
            PropertyId::Person => "Person",
            PropertyId::Definite => "Definite",
            PropertyId::Indefinite => "Indefinite",
            PropertyId::Demonstrative => "Demonstrative",
            PropertyId::ProperName => "ProperName",
            PropertyId::ProperNameType => "ProperNameType",
            PropertyId::WnSemClass => "WNSemClass",
            PropertyId::NpSemanticType => "NPSemanticType",
            PropertyId::Number => "Number",
            PropertyId::Gender => "Gender",
            PropertyId::Animacy => "Animacy",
            PropertyId::GramRole => "GramRole",
            PropertyId::Conjunction => "Conjunction",
            PropertyId::Embedded => "Embedded",
            PropertyId::MaximalNp => "MaximalNP",
            PropertyId::SentNum => "SentNum",
            PropertyId::ParNum => "ParNum",
            PropertyId::CorefId => "CorefID",
            PropertyId::InQuote => "InQuote",
            PropertyId::Author => "Author",
            PropertyId::CompAuthor => "CompAuthor",
            PropertyId::NoDetText => "NoDetText",
        }
    }

    pub fn from_name(name: &str) -> Option<PropertyId> {
        PropertyId::ALL.iter().copied().find(|id| id.name() == name)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value yielded by a whole-document computation.
///
/// A batch may yield values for properties other than the one requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Computed {
    pub property: PropertyId,
    pub key: SpanKey,
    pub value: PropertyValue,
}

impl Computed {
    pub fn new(property: PropertyId, mention: &Annotation, value: PropertyValue) -> Self {
        Self {
            property,
            key: mention.key(),
            value,
        }
    }
}

/// A named, lazily computed value over a mention.
///
/// Implementations read the document and ask the engine for the properties
/// they depend on; the engine memoizes the result when [`cached`](Self::cached)
/// is true.
pub trait Property {
    fn id(&self) -> PropertyId;

    /// Properties read by [`produce`](Self::produce); must form a DAG.
    fn dependencies(&self) -> &'static [PropertyId] {
        &[]
    }

    /// Whether values are computed for all mentions at once.
    fn whole_document(&self) -> bool {
        false
    }

    fn cached(&self) -> bool {
        true
    }

    /// Compute the value for a single mention.
    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue>;

    /// Compute values for every mention of `mentions`.
    ///
    /// The default runs [`produce`](Self::produce) for each mention not cached yet.
    fn produce_all(
        &self,
        mentions: &AnnotationSet,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<Vec<Computed>> {
        let mut computed = Vec::with_capacity(mentions.len());
        for mention in mentions {
            if engine.cached(self.id(), mention).is_some() {
                continue;
            }
            let value = self.produce(mention, engine, doc)?;
            computed.push(Computed::new(self.id(), mention, value));
        }
        Ok(computed)
    }
}

impl fmt::Debug for dyn Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property").field("id", &self.id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for id in PropertyId::ALL {
            assert_eq!(PropertyId::from_name(id.name()), Some(id));
        }
        assert_eq!(PropertyId::from_name("Bogus"), None);
        assert_eq!(PropertyId::WnSemClass.to_string(), "WNSemClass");
    }
}
