//! Quotations and their speakers.
//!
//! Quotes are delimited by straight double quotes, curly double quotes or
//! PTB-style ` `` ` / `''` pairs. The speaker of a quote is the mention
//! nearest to a reporting verb ("said", "told", ...) found right after the
//! quote, or failing that right before it.

use unicode_segmentation::UnicodeSegmentation;

use reconcile::{Annotation, AnnotationSet};
use reconcile_document::{names, Document};

use crate::{Computed, Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

/// Bytes searched on either side of a quote for a reporting verb.
const WINDOW: usize = 80;

const REPORTING_VERBS: &[&str] = &[
    "said", "says", "say", "told", "tells", "asked", "asks", "added", "adds", "stated",
    "states", "explained", "replied", "declared", "noted", "announced", "insisted", "wrote",
    "according",
];

/// Byte ranges of every closed quotation, marks included.
pub fn find_quotes(text: &str) -> Vec<(usize, usize)> {
    let mut quotes = Vec::new();
    let mut open: Option<usize> = None;
    let mut chars = text.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '`' if text[idx..].starts_with("``") => {
                chars.next();
                open = Some(idx);
            }
            '\'' if text[idx..].starts_with("''") => {
                chars.next();
                if let Some(start) = open.take() {
                    quotes.push((start, idx + 2));
                }
            }
            '\u{201C}' => open = Some(idx),
            '\u{201D}' => {
                if let Some(start) = open.take() {
                    quotes.push((start, idx + c.len_utf8()));
                }
            }
            '"' => match open.take() {
                Some(start) => quotes.push((start, idx + 1)),
                None => open = Some(idx),
            },
            _ => {}
        }
    }
    quotes
}

fn floor_boundary(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_boundary(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// Reporting verbs inside `[from, to)`, as absolute byte ranges.
fn reporting_verbs(text: &str, from: usize, to: usize) -> Vec<(usize, usize)> {
    if from >= to {
        return Vec::new();
    }
    text[from..to]
        .split_word_bound_indices()
        .filter(|(_, word)| REPORTING_VERBS.contains(&word.to_lowercase().as_str()))
        .map(|(offset, word)| (from + offset, from + offset + word.len()))
        .collect()
}

fn distance(mention: &Annotation, verb: (usize, usize)) -> usize {
    if mention.end() <= verb.0 {
        verb.0 - mention.end()
    } else {
        mention.start().saturating_sub(verb.1)
    }
}

/// Quotes of a document and the speaker found for each.
struct QuoteAnalysis {
    quotes: Vec<(usize, usize)>,
    authors: Vec<Option<Annotation>>,
}

impl QuoteAnalysis {
    fn new(text: &str, mentions: &AnnotationSet) -> Self {
        let quotes = find_quotes(text);
        let outside: Vec<&Annotation> = mentions
            .iter()
            .filter(|mention| {
                !quotes
                    .iter()
                    .any(|(start, end)| mention.overlaps(*start, *end))
            })
            .collect();
        let authors = (0..quotes.len())
            .map(|idx| Self::author(text, &quotes, idx, &outside))
            .collect();
        Self { quotes, authors }
    }

    fn author(
        text: &str,
        quotes: &[(usize, usize)],
        idx: usize,
        outside: &[&Annotation],
    ) -> Option<Annotation> {
        let (start, end) = quotes[idx];

        let next_quote = quotes.get(idx + 1).map_or(text.len(), |quote| quote.0);
        let after = floor_boundary(text, next_quote.min(end + WINDOW));
        if let Some(verb) = reporting_verbs(text, end, after).first() {
            if let Some(author) = Self::nearest(outside, *verb, end, after) {
                return Some(author);
            }
        }

        let previous_quote = if idx > 0 { quotes[idx - 1].1 } else { 0 };
        let before = ceil_boundary(text, previous_quote.max(start.saturating_sub(WINDOW)));
        let verb = *reporting_verbs(text, before, start).last()?;
        Self::nearest(outside, verb, before, start)
    }

    /// The maximal mention inside `[lo, hi)` closest to `verb`.
    fn nearest(
        outside: &[&Annotation],
        verb: (usize, usize),
        lo: usize,
        hi: usize,
    ) -> Option<Annotation> {
        let window: Vec<&Annotation> = outside
            .iter()
            .copied()
            .filter(|mention| lo <= mention.start() && mention.end() <= hi)
            .filter(|mention| !mention.overlaps(verb.0, verb.1))
            .collect();
        window
            .iter()
            .filter(|mention| !window.iter().any(|other| other.proper_covers_span(mention)))
            .min_by_key(|mention| (distance(mention, verb), mention.start()))
            .map(|mention| (*mention).clone())
    }

    fn quote_of(&self, mention: &Annotation) -> Option<usize> {
        self.quotes
            .iter()
            .position(|(start, end)| *start <= mention.start() && mention.end() <= *end)
    }

    fn value(&self, id: PropertyId, mention: &Annotation) -> PropertyValue {
        match id {
            PropertyId::InQuote => self
                .quote_of(mention)
                .map_or(PropertyValue::None, |idx| PropertyValue::Int(idx as i64)),
            PropertyId::Author => self
                .quote_of(mention)
                .and_then(|idx| self.authors[idx].clone())
                .into(),
            PropertyId::CompAuthor => self
                .authors
                .iter()
                .flatten()
                .any(|author| author.key() == mention.key())
                .into(),
            _ => PropertyValue::None,
        }
    }
}

const QUOTE_PROPERTIES: [PropertyId; 3] = [
    PropertyId::InQuote,
    PropertyId::Author,
    PropertyId::CompAuthor,
];

fn quote_value(id: PropertyId, mention: &Annotation, doc: &mut Document) -> PropertyResult<PropertyValue> {
    let text = doc.raw_text()?;
    let mentions = doc.require_set(names::NPS)?;
    Ok(QuoteAnalysis::new(&text, &mentions).value(id, mention))
}

/// One batch fills all three quote properties.
fn quote_values_all(mentions: &AnnotationSet, doc: &mut Document) -> PropertyResult<Vec<Computed>> {
    let text = doc.raw_text()?;
    let analysis = QuoteAnalysis::new(&text, mentions);
    Ok(mentions
        .iter()
        .flat_map(|mention| {
            QUOTE_PROPERTIES
                .iter()
                .map(|id| Computed::new(*id, mention, analysis.value(*id, mention)))
                .collect::<Vec<_>>()
        })
        .collect())
}

macro_rules! quote_property {
    ($(#[$meta:meta])* $name:ident, $id:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Property for $name {
            fn id(&self) -> PropertyId {
                PropertyId::$id
            }

            fn whole_document(&self) -> bool {
                true
            }

            fn produce(
                &self,
                mention: &Annotation,
                _engine: &mut PropertyEngine,
                doc: &mut Document,
            ) -> PropertyResult<PropertyValue> {
                quote_value(self.id(), mention, doc)
            }

            fn produce_all(
                &self,
                mentions: &AnnotationSet,
                _engine: &mut PropertyEngine,
                doc: &mut Document,
            ) -> PropertyResult<Vec<Computed>> {
                quote_values_all(mentions, doc)
            }
        }
    };
}

quote_property!(
    /// Index of the quotation holding the mention.
    InQuoteProperty,
    InQuote
);
quote_property!(
    /// Speaker of the quotation holding the mention.
    AuthorProperty,
    Author
);
quote_property!(
    /// Whether the mention is the speaker of some quotation.
    CompAuthorProperty,
    CompAuthor
);
