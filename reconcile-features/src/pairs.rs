//! Mention pair generators.
//!
//! A generator is initialized once per document and then drained pair by
//! pair. Pairs are `(antecedent, anaphor)` with the antecedent first in
//! document order; for each anaphor, candidates run from the closest
//! antecedent backwards. Pairs are produced on demand; a generator holds the
//! mentions and at most one pair ahead.

use reconcile::{Annotation, AnnotationSet};
use reconcile_properties::PropertyId;
use tracing::debug;

use crate::{FeatureContext, FeatureError, FeatureResult};

/// Single-pass source of mention pairs.
pub trait PairGenerator {
    fn name(&self) -> &'static str;

    /// Prepare the pairs of one document.
    fn initialize(
        &mut self,
        mentions: &AnnotationSet,
        ctx: &mut FeatureContext<'_>,
    ) -> FeatureResult<()>;

    fn has_next(&self) -> bool;

    fn next_pair(&mut self) -> Option<(Annotation, Annotation)>;
}

/// Walks anaphors in document order and, for each one, its candidate
/// antecedents from the closest backwards, one pair ahead of the caller.
#[derive(Debug, Default)]
struct PairCursor {
    mentions: Vec<Annotation>,
    anaphor: usize,
    /// Candidates of the current anaphor still to visit are `floor..next`.
    next: usize,
    floor: usize,
    pending: Option<(usize, usize)>,
}

impl PairCursor {
    fn reset(&mut self, mentions: Vec<Annotation>) {
        *self = Self {
            mentions,
            ..Self::default()
        };
    }

    /// Move to the next kept pair. `floor` names the lowest antecedent of a
    /// new anaphor, `None` skipping it; `keep` filters candidates.
    fn fill(
        &mut self,
        mut floor: impl FnMut(usize) -> Option<usize>,
        mut keep: impl FnMut(usize, usize) -> bool,
    ) {
        self.pending = loop {
            if self.next > self.floor {
                self.next -= 1;
                if keep(self.next, self.anaphor) {
                    break Some((self.next, self.anaphor));
                }
                continue;
            }
            if self.anaphor + 1 >= self.mentions.len() {
                self.anaphor = self.mentions.len();
                break None;
            }
            self.anaphor += 1;
            match floor(self.anaphor) {
                Some(lowest) => {
                    self.floor = lowest.min(self.anaphor);
                    self.next = self.anaphor;
                }
                None => {
                    self.floor = 0;
                    self.next = 0;
                }
            }
        };
    }

    fn has_next(&self) -> bool {
        self.pending.is_some()
    }

    fn take(&mut self) -> Option<(Annotation, Annotation)> {
        let (antecedent, anaphor) = self.pending.take()?;
        Some((
            self.mentions[antecedent].clone(),
            self.mentions[anaphor].clone(),
        ))
    }
}

/// Drains a generator as an iterator.
pub struct Pairs<'g> {
    generator: &'g mut dyn PairGenerator,
}

impl<'g> Pairs<'g> {
    pub fn new(generator: &'g mut dyn PairGenerator) -> Self {
        Self { generator }
    }
}

impl Iterator for Pairs<'_> {
    type Item = (Annotation, Annotation);

    fn next(&mut self) -> Option<Self::Item> {
        self.generator.next_pair()
    }
}

fn every_antecedent(_anaphor: usize) -> Option<usize> {
    Some(0)
}

fn keep_all(_antecedent: usize, _anaphor: usize) -> bool {
    true
}

/// All ordered pairs of distinct mentions.
#[derive(Debug, Default)]
pub struct AllPairs {
    cursor: PairCursor,
}

impl PairGenerator for AllPairs {
    fn name(&self) -> &'static str {
        "AllPairs"
    }

    fn initialize(
        &mut self,
        mentions: &AnnotationSet,
        _ctx: &mut FeatureContext<'_>,
    ) -> FeatureResult<()> {
        self.cursor.reset(mentions.to_vec());
        self.cursor.fill(every_antecedent, keep_all);
        Ok(())
    }

    fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    fn next_pair(&mut self) -> Option<(Annotation, Annotation)> {
        let pair = self.cursor.take()?;
        self.cursor.fill(every_antecedent, keep_all);
        Some(pair)
    }
}

/// Pairs at most `window` sentences apart.
#[derive(Debug)]
pub struct Windowed {
    window: i64,
    sentences: Vec<Option<i64>>,
    cursor: PairCursor,
}

impl Windowed {
    pub const DEFAULT_WINDOW: i64 = 3;

    pub fn new(window: i64) -> Self {
        Self {
            window,
            sentences: Vec::new(),
            cursor: PairCursor::default(),
        }
    }

    fn advance(&mut self) {
        let (window, sentences) = (self.window, &self.sentences);
        self.cursor.fill(every_antecedent, |i, j| match (sentences[i], sentences[j]) {
            (Some(a), Some(b)) => (b - a).abs() <= window,
            _ => true,
        });
    }
}

impl Default for Windowed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

impl PairGenerator for Windowed {
    fn name(&self) -> &'static str {
        "Windowed"
    }

    fn initialize(
        &mut self,
        mentions: &AnnotationSet,
        ctx: &mut FeatureContext<'_>,
    ) -> FeatureResult<()> {
        let mentions = mentions.to_vec();
        self.sentences.clear();
        for mention in &mentions {
            self.sentences.push(ctx.int(PropertyId::SentNum, mention)?);
        }
        self.cursor.reset(mentions);
        self.advance();
        Ok(())
    }

    fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    fn next_pair(&mut self) -> Option<(Annotation, Annotation)> {
        let pair = self.cursor.take()?;
        self.advance();
        Some(pair)
    }
}

/// Soon et al. instance selection.
///
/// Training pairs each anaphor with its closest coreferent antecedent and with
/// every mention in between; anaphors without an antecedent yield nothing.
/// Testing pairs each mention with all preceding mentions.
#[derive(Debug, Default)]
pub struct Soon {
    /// Gold chain of every mention; empty outside training.
    chains: Vec<Option<String>>,
    training: bool,
    cursor: PairCursor,
}

impl Soon {
    fn advance(&mut self) {
        if !self.training {
            self.cursor.fill(every_antecedent, keep_all);
            return;
        }
        let chains = &self.chains;
        self.cursor.fill(
            |j| {
                let chain = chains[j].as_ref()?;
                (0..j).rev().find(|i| chains[*i].as_ref() == Some(chain))
            },
            keep_all,
        );
    }
}

impl PairGenerator for Soon {
    fn name(&self) -> &'static str {
        "Soon"
    }

    fn initialize(
        &mut self,
        mentions: &AnnotationSet,
        ctx: &mut FeatureContext<'_>,
    ) -> FeatureResult<()> {
        let mentions = mentions.to_vec();
        self.training = ctx.training;
        self.chains.clear();
        if self.training {
            for mention in &mentions {
                self.chains.push(ctx.text(PropertyId::CorefId, mention)?);
            }
            debug!(
                mentions = mentions.len(),
                chained = self.chains.iter().filter(|c| c.is_some()).count(),
                "selecting training pairs"
            );
        }
        self.cursor.reset(mentions);
        self.advance();
        Ok(())
    }

    fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    fn next_pair(&mut self) -> Option<(Annotation, Annotation)> {
        let pair = self.cursor.take()?;
        self.advance();
        Some(pair)
    }
}

/// Construct a generator by its configured name.
pub fn pair_generator(name: &str, window: Option<i64>) -> FeatureResult<Box<dyn PairGenerator>> {
    match name {
        "AllPairs" => Ok(Box::new(AllPairs::default())),
        "Windowed" => Ok(Box::new(
            window.map_or_else(Windowed::default, Windowed::new),
        )),
        "Soon" => Ok(Box::new(Soon::default())),
        other => Err(FeatureError::UnknownGenerator(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{engine, story};
    use reconcile_document::names;

    fn drain(generator: &mut dyn PairGenerator) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();
        while generator.has_next() {
            let (a, b) = generator.next_pair().unwrap();
            pairs.push((a.id(), b.id()));
        }
        assert!(generator.next_pair().is_none());
        pairs
    }

    #[test]
    fn test_all_pairs_closest_first() {
        let mut doc = story();
        let mut engine = engine();
        let nps = doc.require_set(names::NPS).unwrap();
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);
        let mut generator = AllPairs::default();
        generator.initialize(&nps, &mut ctx).unwrap();
        let pairs = drain(&mut generator);
        assert_eq!(pairs.len(), 10);
        assert_eq!(&pairs[..4], &[(1, 2), (2, 3), (1, 3), (3, 4)]);
    }

    #[test]
    fn test_soon_training_pairs() {
        let mut doc = story();
        let mut engine = engine();
        let nps = doc.require_set(names::NPS).unwrap();
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, true);
        let mut generator = Soon::default();
        generator.initialize(&nps, &mut ctx).unwrap();
        // senator -> John Smith; Smith -> senator with IBM and We in between
        insta::assert_debug_snapshot!(drain(&mut generator), @r###"
        [
            (
                1,
                2,
            ),
            (
                4,
                5,
            ),
            (
                3,
                5,
            ),
            (
                2,
                5,
            ),
        ]
        "###);
    }

    #[test]
    fn test_windowed_respects_sentence_distance() {
        let mut doc = story();
        let mut engine = engine();
        let nps = doc.require_set(names::NPS).unwrap();
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);
        let mut generator = Windowed::new(0);
        generator.initialize(&nps, &mut ctx).unwrap();
        // sentence one holds mentions 1-3, sentence two 4-5
        assert_eq!(drain(&mut generator).len(), 3 + 1);
    }

    #[test]
    fn test_long_document_pairs_on_demand() {
        let text = "x ".repeat(5_000);
        let mut nps = reconcile::AnnotationSet::new(names::NPS);
        for idx in 0..5_000 {
            nps.add_span(idx * 2, idx * 2 + 1, "NP").unwrap();
        }
        let mut doc = reconcile_document::Document::from_text("long", text).unwrap();
        let nps = doc.add_annotation_set(nps, names::NPS, false).unwrap();
        let mut engine = engine();
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);

        let mut generator = AllPairs::default();
        generator.initialize(&nps, &mut ctx).unwrap();
        let first: Vec<(u32, u32)> = Pairs::new(&mut generator)
            .take(4)
            .map(|(a, b)| (a.id(), b.id()))
            .collect();
        assert_eq!(first, vec![(1, 2), (2, 3), (1, 3), (3, 4)]);
        assert!(generator.has_next());
        assert_eq!(generator.next_pair().map(|(a, b)| (a.id(), b.id())), Some((2, 4)));
    }

    #[test]
    fn test_single_mention_yields_nothing() {
        let mut doc = story();
        let mut engine = engine();
        let mut single = reconcile::AnnotationSet::new(names::NPS);
        single.add_span(0, 4, "NP").unwrap();
        let mut ctx = FeatureContext::new(&mut doc, &mut engine, false);
        let mut generator = Soon::default();
        generator.initialize(&single, &mut ctx).unwrap();
        assert!(!generator.has_next());
        assert!(generator.next_pair().is_none());
    }

    #[test]
    fn test_unknown_generator() {
        assert!(matches!(
            pair_generator("Nearest", None),
            Err(FeatureError::UnknownGenerator(name)) if name == "Nearest"
        ));
    }
}
