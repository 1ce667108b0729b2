//! Built-in pairwise features.
//!
//! Nominal features answer `C`/`I` (compatible, incompatible), `NA` when a
//! side carries no information, or `Y`/`N` for a property of one side.

mod class;
mod grammatical;
mod positional;
mod semantic;
mod strings;

pub use class::ClassLabel;
pub use grammatical::{
    Animacy, Appositive, BothProperNouns, Definite2, Demonstrative2, Embedded1, Embedded2,
    GenderAgreement, MaximalNp, NumberAgreement, Pronoun1, Pronoun2, SpanFeature, Subject1,
    Subject2,
};
pub use positional::{
    BothInQuotes, DocNo, Id1, Id2, ParNum, QuoteAuthor, SentNum, DOC_NO_ATTRIBUTE,
};
pub use semantic::{ProperNameType, SemClassAgreement};
pub use strings::{Alias, HeadMatch, PnStr, ProStr, SoonStr, WordsStr};

use crate::value::{COMPATIBLE, INCOMPATIBLE, NO, NOT_APPLICABLE, YES};

pub(crate) const C_I: &[&str] = &[COMPATIBLE, INCOMPATIBLE];
pub(crate) const C_I_NA: &[&str] = &[COMPATIBLE, INCOMPATIBLE, NOT_APPLICABLE];
pub(crate) const Y_N: &[&str] = &[YES, NO];

/// Declare a unit-struct feature with a fixed name and kind.
macro_rules! define_feature {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $kind:expr, |$a:ident, $b:ident, $ctx:ident, $row:ident| $body:block) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl $crate::Feature for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn kind(&self) -> $crate::FeatureKind {
                $kind
            }

            #[allow(unused_variables)]
            fn value(
                &self,
                $a: &reconcile::Annotation,
                $b: &reconcile::Annotation,
                $ctx: &mut $crate::FeatureContext<'_>,
                $row: &$crate::FeatureRow,
            ) -> $crate::FeatureResult<$crate::FeatureValue> {
                $body
            }
        }
    };
}

pub(crate) use define_feature;
