//! Word lists and the semantic lexicon.
//!
//! [`SemanticLexicon`] stands in for WordNet: it maps a common noun to a
//! coarse [`SemClass`]. The embedded [`StaticLexicon`] covers frequent
//! newswire nouns; larger lexicons are injected through the registry.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use crate::value::{Gender, SemClass};

/// Source of semantic classes for common nouns.
pub trait SemanticLexicon: Send + Sync {
    /// Class of `noun` (lowercase), or [`SemClass::Unknown`].
    fn sem_class(&self, noun: &str) -> SemClass;
}

/// Lexicon held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLexicon {
    entries: HashMap<String, SemClass>,
}

impl StaticLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded noun table.
    pub fn builtin() -> Self {
        BUILTIN_NOUNS
            .iter()
            .map(|(noun, class)| (noun.to_string(), *class))
            .collect()
    }

    pub fn insert(&mut self, noun: impl Into<String>, class: SemClass) {
        self.entries.insert(noun.into().to_lowercase(), class);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SemClass)> for StaticLexicon {
    fn from_iter<I: IntoIterator<Item = (String, SemClass)>>(iter: I) -> Self {
        let mut lexicon = Self::new();
        for (noun, class) in iter {
            lexicon.insert(noun, class);
        }
        lexicon
    }
}

impl SemanticLexicon for StaticLexicon {
    fn sem_class(&self, noun: &str) -> SemClass {
        let noun = noun.to_lowercase();
        singular_candidates(&noun)
            .into_iter()
            .find_map(|candidate| self.entries.get(&candidate).copied())
            .unwrap_or(SemClass::Unknown)
    }
}

/// `noun` followed by plausible singular forms.
fn singular_candidates(noun: &str) -> Vec<String> {
    let mut candidates = vec![noun.to_string()];
    if let Some(stem) = noun.strip_suffix("ies") {
        candidates.push(format!("{stem}y"));
    }
    if let Some(stem) = noun.strip_suffix("men") {
        candidates.push(format!("{stem}man"));
    }
    if let Some(stem) = noun.strip_suffix("es") {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = noun.strip_suffix('s') {
        candidates.push(stem.to_string());
    }
    candidates
}

const BUILTIN_NOUNS: &[(&str, SemClass)] = &[
    ("man", SemClass::Male),
    ("boy", SemClass::Male),
    ("father", SemClass::Male),
    ("son", SemClass::Male),
    ("brother", SemClass::Male),
    ("husband", SemClass::Male),
    ("king", SemClass::Male),
    ("businessman", SemClass::Male),
    ("chairman", SemClass::Male),
    ("spokesman", SemClass::Male),
    ("woman", SemClass::Female),
    ("girl", SemClass::Female),
    ("mother", SemClass::Female),
    ("daughter", SemClass::Female),
    ("sister", SemClass::Female),
    ("wife", SemClass::Female),
    ("queen", SemClass::Female),
    ("spokeswoman", SemClass::Female),
    ("person", SemClass::Person),
    ("people", SemClass::Person),
    ("official", SemClass::Person),
    ("president", SemClass::Person),
    ("senator", SemClass::Person),
    ("minister", SemClass::Person),
    ("leader", SemClass::Person),
    ("executive", SemClass::Person),
    ("director", SemClass::Person),
    ("analyst", SemClass::Person),
    ("lawyer", SemClass::Person),
    ("judge", SemClass::Person),
    ("doctor", SemClass::Person),
    ("teacher", SemClass::Person),
    ("student", SemClass::Person),
    ("worker", SemClass::Person),
    ("employee", SemClass::Person),
    ("soldier", SemClass::Person),
    ("child", SemClass::Person),
    ("children", SemClass::Person),
    ("pilot", SemClass::Person),
    ("passenger", SemClass::Person),
    ("spokesperson", SemClass::Person),
    ("company", SemClass::Organization),
    ("corporation", SemClass::Organization),
    ("firm", SemClass::Organization),
    ("bank", SemClass::Organization),
    ("agency", SemClass::Organization),
    ("government", SemClass::Organization),
    ("party", SemClass::Organization),
    ("group", SemClass::Organization),
    ("university", SemClass::Organization),
    ("committee", SemClass::Organization),
    ("airline", SemClass::Organization),
    ("court", SemClass::Organization),
    ("city", SemClass::Location),
    ("country", SemClass::Location),
    ("nation", SemClass::Location),
    ("state", SemClass::Location),
    ("town", SemClass::Location),
    ("village", SemClass::Location),
    ("region", SemClass::Location),
    ("area", SemClass::Location),
    ("capital", SemClass::Location),
    ("airport", SemClass::Location),
    ("day", SemClass::Date),
    ("week", SemClass::Date),
    ("month", SemClass::Date),
    ("year", SemClass::Date),
    ("monday", SemClass::Date),
    ("friday", SemClass::Date),
    ("hour", SemClass::Time),
    ("minute", SemClass::Time),
    ("morning", SemClass::Time),
    ("night", SemClass::Time),
    ("dollar", SemClass::Money),
    ("cent", SemClass::Money),
    ("yen", SemClass::Money),
    ("percent", SemClass::Percent),
    ("book", SemClass::Object),
    ("table", SemClass::Object),
    ("plane", SemClass::Object),
    ("car", SemClass::Object),
    ("house", SemClass::Object),
    ("report", SemClass::Object),
    ("plan", SemClass::Object),
    ("price", SemClass::Object),
    ("share", SemClass::Object),
    ("stock", SemClass::Object),
];

static MALE_FIRST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "john", "james", "robert", "michael", "william", "david", "richard", "joseph", "thomas",
        "charles", "george", "paul", "mark", "peter", "bill", "bob", "jim", "tom", "frank",
        "edward", "henry", "jack", "steven", "andrew", "daniel", "ronald", "kenneth", "brian",
    ]
    .into_iter()
    .collect()
});

static FEMALE_FIRST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mary", "patricia", "linda", "barbara", "elizabeth", "jennifer", "maria", "susan",
        "margaret", "dorothy", "lisa", "nancy", "karen", "betty", "helen", "sandra", "donna",
        "carol", "sarah", "anne", "ann", "jane", "hillary", "diana", "laura", "emily",
    ]
    .into_iter()
    .collect()
});

static HONORIFICS: Lazy<HashMap<&'static str, Gender>> = Lazy::new(|| {
    [
        ("mr", Gender::Masculine),
        ("mister", Gender::Masculine),
        ("sir", Gender::Masculine),
        ("lord", Gender::Masculine),
        ("king", Gender::Masculine),
        ("prince", Gender::Masculine),
        ("mrs", Gender::Feminine),
        ("ms", Gender::Feminine),
        ("miss", Gender::Feminine),
        ("madam", Gender::Feminine),
        ("lady", Gender::Feminine),
        ("queen", Gender::Feminine),
        ("princess", Gender::Feminine),
        ("dr", Gender::Either),
        ("prof", Gender::Either),
        ("sen", Gender::Either),
        ("rep", Gender::Either),
        ("gov", Gender::Either),
        ("gen", Gender::Either),
    ]
    .into_iter()
    .collect()
});

/// Gender suggested by a first name, if it is a known one.
pub fn first_name_gender(name: &str) -> Option<Gender> {
    let name = name.to_lowercase();
    if MALE_FIRST_NAMES.contains(name.as_str()) {
        Some(Gender::Masculine)
    } else if FEMALE_FIRST_NAMES.contains(name.as_str()) {
        Some(Gender::Feminine)
    } else {
        None
    }
}

/// Gender implied by a title such as `Mr.` or `Mrs`.
pub fn honorific_gender(word: &str) -> Option<Gender> {
    let word = word.trim_end_matches('.').to_lowercase();
    HONORIFICS.get(word.as_str()).copied()
}

pub fn is_honorific(word: &str) -> bool {
    honorific_gender(word).is_some()
}

/// Unicode words of `text`, punctuation dropped.
pub fn words(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_with_plurals() {
        let lexicon = StaticLexicon::builtin();
        assert_eq!(lexicon.sem_class("Senator"), SemClass::Person);
        assert_eq!(lexicon.sem_class("companies"), SemClass::Organization);
        assert_eq!(lexicon.sem_class("women"), SemClass::Female);
        assert_eq!(lexicon.sem_class("cities"), SemClass::Location);
        assert_eq!(lexicon.sem_class("zeppelin"), SemClass::Unknown);
    }

    #[test]
    fn test_name_and_title_tables() {
        assert_eq!(first_name_gender("Mary"), Some(Gender::Feminine));
        assert_eq!(first_name_gender("John"), Some(Gender::Masculine));
        assert_eq!(first_name_gender("Xylo"), None);
        assert_eq!(honorific_gender("Mr."), Some(Gender::Masculine));
        assert_eq!(honorific_gender("MRS"), Some(Gender::Feminine));
        assert!(is_honorific("Dr."));
        assert!(!is_honorific("the"));
    }

    #[test]
    fn test_words_drop_punctuation() {
        assert_eq!(words("Mr. Smith, the senator"), vec!["Mr", "Smith", "the", "senator"]);
    }
}
