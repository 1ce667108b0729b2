//! Pronoun classification.

use reconcile::Annotation;
use reconcile_document::Document;

use super::lower_text;
use crate::value::{Person, PronounType};
use crate::{Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

const PERSONAL: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them",
];
const POSSESSIVE: &[&str] = &[
    "my", "mine", "your", "yours", "his", "hers", "its", "our", "ours", "their", "theirs",
];
const REFLEXIVE: &[&str] = &[
    "myself", "yourself", "himself", "herself", "itself", "ourselves", "yourselves",
    "themselves",
];
const DEMONSTRATIVE: &[&str] = &["this", "that", "these", "those"];
const RELATIVE: &[&str] = &["who", "whom", "whose", "which"];

const FIRST_PERSON: &[&str] = &["i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves"];
const SECOND_PERSON: &[&str] = &["you", "your", "yours", "yourself", "yourselves"];

/// Class of a single lowercase word.
pub(crate) fn classify(word: &str) -> PronounType {
    if PERSONAL.contains(&word) {
        PronounType::Personal
    } else if POSSESSIVE.contains(&word) {
        PronounType::Possessive
    } else if REFLEXIVE.contains(&word) {
        PronounType::Reflexive
    } else if DEMONSTRATIVE.contains(&word) {
        PronounType::Demonstrative
    } else if RELATIVE.contains(&word) {
        PronounType::Relative
    } else {
        PronounType::None
    }
}

pub(crate) fn person_of(word: &str) -> Person {
    if FIRST_PERSON.contains(&word) {
        Person::First
    } else if SECOND_PERSON.contains(&word) {
        Person::Second
    } else {
        Person::Third
    }
}

/// Pronoun class of a one-word mention.
#[derive(Debug, Clone, Copy, Default)]
pub struct PronounProperty;

impl Property for PronounProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Pronoun
    }

    fn produce(
        &self,
        mention: &Annotation,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let text = lower_text(mention, doc)?;
        let class = if text.contains(char::is_whitespace) {
            PronounType::None
        } else {
            classify(&text)
        };
        Ok(PropertyValue::Pronoun(class))
    }
}

/// Grammatical person; does not apply to non-pronouns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonProperty;

impl Property for PersonProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Person
    }

    fn dependencies(&self) -> &'static [PropertyId] {
        &[PropertyId::Pronoun]
    }

    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        if !engine.pronoun(PropertyId::Pronoun, mention, doc)?.is_pronoun() {
            return Ok(PropertyValue::None);
        }
        Ok(PropertyValue::Person(person_of(&lower_text(mention, doc)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::fixtures::{engine, mention, with_mentions};

    #[test]
    fn test_pronoun_classes() {
        let mut doc = Document::from_text("p", "She said that we saw him and the dog itself").unwrap();
        with_mentions(&mut doc, &["She", "we", "him", "the dog", "itself"]);
        let mut engine = engine();

        let cases = [
            ("She", PronounType::Personal, Some(Person::Third)),
            ("we", PronounType::Personal, Some(Person::First)),
            ("him", PronounType::Personal, Some(Person::Third)),
            ("the dog", PronounType::None, None),
            ("itself", PronounType::Reflexive, Some(Person::Third)),
        ];
        for (phrase, class, person) in cases {
            let np = mention(&mut doc, phrase);
            assert_eq!(engine.pronoun(PropertyId::Pronoun, &np, &mut doc).unwrap(), class, "{phrase}");
            assert_eq!(engine.person(PropertyId::Person, &np, &mut doc).unwrap(), person, "{phrase}");
        }
    }

    #[test]
    fn test_classify_words() {
        assert_eq!(classify("their"), PronounType::Possessive);
        assert_eq!(classify("those"), PronounType::Demonstrative);
        assert_eq!(classify("whom"), PronounType::Relative);
        assert_eq!(person_of("yours"), Person::Second);
    }
}
