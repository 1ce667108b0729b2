//! Built-in mention properties.

mod agreement;
mod coref;
mod determiners;
mod position;
mod pronoun;
mod quotes;
mod semantic;
mod syntax;
mod words;

use std::sync::Arc;

pub use agreement::{AnimacyProperty, GenderProperty, NumberProperty};
pub use coref::CorefIdProperty;
pub use determiners::{
    DefiniteProperty, DemonstrativeProperty, IndefiniteProperty, NoDetTextProperty,
};
pub use position::{ParNumProperty, SentNumProperty};
pub use pronoun::{PersonProperty, PronounProperty};
pub use quotes::{find_quotes, AuthorProperty, CompAuthorProperty, InQuoteProperty};
pub use semantic::{
    NpSemanticTypeProperty, ProperNameProperty, ProperNameTypeProperty, WnSemClassProperty,
};
pub use syntax::{EmbeddedProperty, GramRoleProperty, MaximalNpProperty};
pub use words::{head_of, ConjunctionProperty, HeadNounProperty, HeadPosProperty, WordsProperty};

use crate::lexicon::SemanticLexicon;
use crate::Property;

/// One implementation per [`PropertyId`](crate::PropertyId).
pub fn standard_properties(lexicon: Arc<dyn SemanticLexicon>) -> Vec<Box<dyn Property>> {
    vec![
        Box::new(WordsProperty),
        Box::new(HeadNounProperty),
        Box::new(HeadPosProperty),
        Box::new(PronounProperty),
        Box::new(PersonProperty),
        Box::new(DefiniteProperty),
        Box::new(IndefiniteProperty),
        Box::new(DemonstrativeProperty),
        Box::new(ProperNameProperty),
        Box::new(ProperNameTypeProperty),
        Box::new(WnSemClassProperty::new(lexicon)),
        Box::new(NpSemanticTypeProperty),
        Box::new(NumberProperty),
        Box::new(GenderProperty),
        Box::new(AnimacyProperty),
        Box::new(GramRoleProperty),
        Box::new(ConjunctionProperty),
        Box::new(EmbeddedProperty),
        Box::new(MaximalNpProperty),
        Box::new(SentNumProperty),
        Box::new(ParNumProperty),
        Box::new(CorefIdProperty),
        Box::new(InQuoteProperty),
        Box::new(AuthorProperty),
        Box::new(CompAuthorProperty),
        Box::new(NoDetTextProperty),
    ]
}

/// Lowercased normalized text of a mention.
pub(crate) fn lower_text(
    mention: &reconcile::Annotation,
    doc: &mut reconcile_document::Document,
) -> crate::PropertyResult<String> {
    Ok(doc.annot_text(mention)?.to_lowercase())
}
