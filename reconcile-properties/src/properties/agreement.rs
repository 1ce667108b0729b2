//! Agreement features: number, gender and animacy.

use reconcile::Annotation;
use reconcile_document::Document;

use super::lower_text;
use crate::lexicon::{first_name_gender, honorific_gender, is_honorific, words};
use crate::value::{Animacy, Gender, Number, SemClass};
use crate::{Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

const SINGULAR_PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "this", "that",
];
const PLURAL_PRONOUNS: &[&str] = &[
    "we", "us", "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves",
    "these", "those", "yourselves",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberProperty;

impl Property for NumberProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Number
    }

    fn dependencies(&self) -> &'static [PropertyId] {
        &[
            PropertyId::HeadNoun,
            PropertyId::Pronoun,
            PropertyId::Conjunction,
        ]
    }

    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        if engine.pronoun(PropertyId::Pronoun, mention, doc)?.is_pronoun() {
            let text = lower_text(mention, doc)?;
            let number = if SINGULAR_PRONOUNS.contains(&text.as_str()) {
                Number::Singular
            } else if PLURAL_PRONOUNS.contains(&text.as_str()) {
                Number::Plural
            } else {
                Number::Unknown
            };
            return Ok(PropertyValue::Number(number));
        }
        if engine.flag(PropertyId::Conjunction, mention, doc)? {
            return Ok(PropertyValue::Number(Number::Plural));
        }
        let number = match engine.span(PropertyId::HeadNoun, mention, doc)? {
            Some(head) => match head.kind() {
                "NNS" | "NNPS" => Number::Plural,
                "NN" | "NNP" => Number::Singular,
                _ => Number::Unknown,
            },
            None => Number::Unknown,
        };
        Ok(PropertyValue::Number(number))
    }
}

fn pronoun_gender(word: &str) -> Gender {
    match word {
        "he" | "him" | "his" | "himself" => Gender::Masculine,
        "she" | "her" | "hers" | "herself" => Gender::Feminine,
        "it" | "its" | "itself" => Gender::Neuter,
        "i" | "me" | "my" | "mine" | "myself" | "you" | "your" | "yours" | "yourself" | "we"
        | "us" | "our" | "ours" | "ourselves" => Gender::Either,
        _ => Gender::Unknown,
    }
}

fn class_gender(class: SemClass) -> Gender {
    match class {
        SemClass::Male => Gender::Masculine,
        SemClass::Female => Gender::Feminine,
        SemClass::Person => Gender::Either,
        SemClass::Unknown => Gender::Unknown,
        _ => Gender::Neuter,
    }
}

/// Gender from pronouns, titles, first names and semantic class, in that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderProperty;

impl Property for GenderProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Gender
    }

    fn dependencies(&self) -> &'static [PropertyId] {
        &[
            PropertyId::Pronoun,
            PropertyId::ProperNameType,
            PropertyId::NpSemanticType,
            PropertyId::WnSemClass,
        ]
    }

    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let text = doc.annot_text(mention)?;
        if engine.pronoun(PropertyId::Pronoun, mention, doc)?.is_pronoun() {
            return Ok(PropertyValue::Gender(pronoun_gender(&text.to_lowercase())));
        }

        let tokens = words(&text);
        if let Some(gender) = tokens.first().and_then(|word| honorific_gender(word)) {
            if gender != Gender::Either {
                return Ok(PropertyValue::Gender(gender));
            }
        }

        let named = engine.sem_class(PropertyId::ProperNameType, mention, doc)?;
        if named.is_person() {
            let gender = tokens
                .iter()
                .find(|word| !is_honorific(word))
                .and_then(|name| first_name_gender(name))
                .unwrap_or(Gender::Either);
            return Ok(PropertyValue::Gender(gender));
        }
        if named != SemClass::Unknown {
            return Ok(PropertyValue::Gender(Gender::Neuter));
        }

        let mut class = engine.sem_class(PropertyId::NpSemanticType, mention, doc)?;
        if class == SemClass::Unknown {
            class = engine.sem_class(PropertyId::WnSemClass, mention, doc)?;
        }
        Ok(PropertyValue::Gender(class_gender(class)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnimacyProperty;

impl Property for AnimacyProperty {
    fn id(&self) -> PropertyId {
        PropertyId::Animacy
    }

    fn dependencies(&self) -> &'static [PropertyId] {
        &[PropertyId::NpSemanticType, PropertyId::Pronoun]
    }

    fn produce(
        &self,
        mention: &Annotation,
        engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<PropertyValue> {
        let class = engine.sem_class(PropertyId::NpSemanticType, mention, doc)?;
        let animacy = if class.is_person() {
            Animacy::Animate
        } else if class != SemClass::Unknown {
            Animacy::Inanimate
        } else if engine.pronoun(PropertyId::Pronoun, mention, doc)?.is_pronoun() {
            match lower_text(mention, doc)?.as_str() {
                "this" | "that" | "these" | "those" => Animacy::Inanimate,
                _ => Animacy::Unknown,
            }
        } else {
            Animacy::Unknown
        };
        Ok(PropertyValue::Animacy(animacy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::fixtures::{engine, mention, tagged, with_mentions};
    use reconcile::AnnotationSet;
    use reconcile_document::names;

    fn doc() -> Document {
        let mut doc = tagged(
            "Mrs. Jones and Mary Smith saw the dogs and it",
            &["NNP", "NNP", "CC", "NNP", "NNP", "VBD", "DT", "NNS", "CC", "PRP"],
        );
        let mut entities = AnnotationSet::new(names::NE);
        entities.add_span(0, 10, "PERSON").unwrap();
        entities.add_span(15, 25, "PERSON").unwrap();
        doc.add_annotation_set(entities, names::NE, false).unwrap();
        with_mentions(
            &mut doc,
            &["Mrs. Jones", "Mary Smith", "Mrs. Jones and Mary Smith", "the dogs", "it"],
        );
        doc
    }

    #[test]
    fn test_number() {
        let mut doc = doc();
        let mut engine = engine();
        let cases = [
            ("Mary Smith", Number::Singular),
            ("Mrs. Jones and Mary Smith", Number::Plural),
            ("the dogs", Number::Plural),
            ("it", Number::Singular),
        ];
        for (phrase, number) in cases {
            let np = mention(&mut doc, phrase);
            assert_eq!(engine.number(PropertyId::Number, &np, &mut doc).unwrap(), number, "{phrase}");
        }
    }

    #[test]
    fn test_gender_and_animacy() {
        let mut doc = doc();
        let mut engine = engine();

        let jones = mention(&mut doc, "Mrs. Jones");
        assert_eq!(engine.gender(PropertyId::Gender, &jones, &mut doc).unwrap(), Gender::Feminine);
        assert_eq!(engine.animacy(PropertyId::Animacy, &jones, &mut doc).unwrap(), Animacy::Animate);

        let mary = mention(&mut doc, "Mary Smith");
        assert_eq!(engine.gender(PropertyId::Gender, &mary, &mut doc).unwrap(), Gender::Feminine);

        let it = mention(&mut doc, "it");
        assert_eq!(engine.gender(PropertyId::Gender, &it, &mut doc).unwrap(), Gender::Neuter);
        assert_eq!(engine.animacy(PropertyId::Animacy, &it, &mut doc).unwrap(), Animacy::Inanimate);

        let dogs = mention(&mut doc, "the dogs");
        assert_eq!(engine.gender(PropertyId::Gender, &dogs, &mut doc).unwrap(), Gender::Unknown);
    }
}
