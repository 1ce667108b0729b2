//! Values produced by properties.

use std::fmt;

use reconcile::Annotation;

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    Singular,
    Plural,
    Unknown,
}

/// Grammatical or natural gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
    /// A person of unknown sex.
    Either,
    Unknown,
}

impl Gender {
    /// Whether two mentions may agree in gender.
    pub fn compatible(self, other: Gender) -> bool {
        use Gender::*;
        match (self, other) {
            (Unknown, _) | (_, Unknown) => true,
            (Either, Masculine | Feminine | Either) | (Masculine | Feminine, Either) => true,
            (a, b) => a == b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Animacy {
    Animate,
    Inanimate,
    Unknown,
}

/// Syntactic function of the mention's head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GramRole {
    Subject,
    Object,
    Possessive,
    PrepObject,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PronounType {
    Personal,
    Possessive,
    Reflexive,
    Demonstrative,
    Relative,
    None,
}

impl PronounType {
    pub fn is_pronoun(self) -> bool {
        self != PronounType::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    First,
    Second,
    Third,
}

/// Coarse semantic class.
///
/// `Male` and `Female` refine `Person`; the remaining concrete classes refine
/// `Object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemClass {
    Person,
    Male,
    Female,
    Object,
    Organization,
    Location,
    Date,
    Time,
    Money,
    Percent,
    Unknown,
}

impl SemClass {
    /// Map a named-entity label onto a class.
    pub fn from_ne_label(label: &str) -> SemClass {
        match label.to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => SemClass::Person,
            "ORGANIZATION" | "ORG" => SemClass::Organization,
            "LOCATION" | "LOC" | "GPE" => SemClass::Location,
            "DATE" => SemClass::Date,
            "TIME" => SemClass::Time,
            "MONEY" => SemClass::Money,
            "PERCENT" => SemClass::Percent,
            _ => SemClass::Unknown,
        }
    }

    pub fn parent(self) -> Option<SemClass> {
        match self {
            SemClass::Male | SemClass::Female => Some(SemClass::Person),
            SemClass::Organization
            | SemClass::Location
            | SemClass::Date
            | SemClass::Time
            | SemClass::Money
            | SemClass::Percent => Some(SemClass::Object),
            SemClass::Person | SemClass::Object | SemClass::Unknown => None,
        }
    }

    pub fn is_person(self) -> bool {
        self == SemClass::Person || self.parent() == Some(SemClass::Person)
    }

    /// Equal classes agree, and so does a class with its ancestor.
    pub fn compatible(self, other: SemClass) -> bool {
        self == other || self.parent() == Some(other) || other.parent() == Some(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            SemClass::Person => "PERSON",
            SemClass::Male => "MALE",
            SemClass::Female => "FEMALE",
            SemClass::Object => "OBJECT",
            SemClass::Organization => "ORGANIZATION",
            SemClass::Location => "LOCATION",
            SemClass::Date => "DATE",
            SemClass::Time => "TIME",
            SemClass::Money => "MONEY",
            SemClass::Percent => "PERCENT",
            SemClass::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of one property for one mention.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// The property does not apply to this mention.
    None,
    Bool(bool),
    Int(i64),
    Text(String),
    Span(Annotation),
    Spans(Vec<Annotation>),
    Number(Number),
    Gender(Gender),
    Animacy(Animacy),
    GramRole(GramRole),
    Pronoun(PronounType),
    Person(Person),
    SemClass(SemClass),
}

impl PropertyValue {
    /// Short shape name used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            PropertyValue::None => "none",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::Text(_) => "text",
            PropertyValue::Span(_) => "span",
            PropertyValue::Spans(_) => "spans",
            PropertyValue::Number(_) => "number",
            PropertyValue::Gender(_) => "gender",
            PropertyValue::Animacy(_) => "animacy",
            PropertyValue::GramRole(_) => "gram role",
            PropertyValue::Pronoun(_) => "pronoun type",
            PropertyValue::Person(_) => "person",
            PropertyValue::SemClass(_) => "semantic class",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PropertyValue::None)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<Option<Annotation>> for PropertyValue {
    fn from(value: Option<Annotation>) -> Self {
        value.map_or(PropertyValue::None, PropertyValue::Span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sem_class_hierarchy() {
        assert!(SemClass::Male.compatible(SemClass::Person));
        assert!(SemClass::Person.compatible(SemClass::Female));
        assert!(!SemClass::Male.compatible(SemClass::Female));
        assert!(SemClass::Location.compatible(SemClass::Object));
        assert!(!SemClass::Person.compatible(SemClass::Organization));
        assert_eq!(SemClass::from_ne_label("gpe"), SemClass::Location);
    }

    #[test]
    fn test_gender_compatibility() {
        assert!(Gender::Either.compatible(Gender::Feminine));
        assert!(Gender::Unknown.compatible(Gender::Neuter));
        assert!(!Gender::Masculine.compatible(Gender::Feminine));
        assert!(!Gender::Either.compatible(Gender::Neuter));
    }
}
