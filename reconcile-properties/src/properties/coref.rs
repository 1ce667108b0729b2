//! Gold coreference chain ids.

use std::collections::{HashMap, HashSet};

use reconcile::{Annotation, AnnotationSet};
use reconcile_document::{names, Document};
use tracing::warn;

use crate::{Computed, Property, PropertyEngine, PropertyId, PropertyResult, PropertyValue};

pub const ID_ATTRIBUTE: &str = "ID";
pub const REF_ATTRIBUTE: &str = "REF";

/// Chain root of every gold mention, following `REF` links to the first
/// mention of the chain.
struct GoldChains {
    roots: HashMap<String, String>,
}

impl GoldChains {
    fn new(gold: &AnnotationSet) -> Self {
        let links: HashMap<&str, Option<&str>> = gold
            .iter()
            .filter_map(|mention| {
                let id = mention.attribute(ID_ATTRIBUTE)?;
                Some((id, mention.attribute(REF_ATTRIBUTE)))
            })
            .collect();

        let mut roots = HashMap::with_capacity(links.len());
        for id in links.keys() {
            let mut current = *id;
            let mut seen = HashSet::new();
            while let Some(Some(next)) = links.get(current) {
                if !seen.insert(current) {
                    warn!(id = %id, "cyclic REF chain in gold mentions");
                    break;
                }
                if !links.contains_key(next) {
                    warn!(id = %current, reference = %next, "REF points at unknown gold mention");
                    break;
                }
                current = *next;
            }
            roots.insert(id.to_string(), current.to_string());
        }
        Self { roots }
    }

    /// Chain of the gold mention matching `mention`.
    ///
    /// Exact offsets win; otherwise a gold mention ending where the mention
    /// ends and overlapping it.
    fn chain_of(&self, gold: &AnnotationSet, mention: &Annotation) -> Option<String> {
        let matched = gold
            .exact(mention.start(), mention.end())
            .first()
            .cloned()
            .or_else(|| {
                gold.overlapping_span(mention)
                    .iter()
                    .find(|candidate| candidate.end() == mention.end())
                    .cloned()
            })?;
        let id = matched.attribute(ID_ATTRIBUTE)?;
        self.roots.get(id).cloned()
    }

    fn value(&self, gold: &AnnotationSet, mention: &Annotation) -> PropertyValue {
        match mention.attribute(PropertyId::CorefId.name()) {
            Some(preset) => PropertyValue::Text(preset.to_string()),
            None => self
                .chain_of(gold, mention)
                .map_or(PropertyValue::None, PropertyValue::Text),
        }
    }
}

/// Gold chain id of a mention; unmatched mentions are singletons.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorefIdProperty;

impl Property for CorefIdProperty {
    fn id(&self) -> PropertyId {
        PropertyId::CorefId
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
        let gold = doc.require_set(names::GOLD_NPS)?;
        Ok(GoldChains::new(&gold).value(&gold, mention))
    }

    fn produce_all(
        &self,
        mentions: &AnnotationSet,
        _engine: &mut PropertyEngine,
        doc: &mut Document,
    ) -> PropertyResult<Vec<Computed>> {
        let gold = doc.require_set(names::GOLD_NPS)?;
        let chains = GoldChains::new(&gold);
        Ok(mentions
            .iter()
            .map(|mention| Computed::new(self.id(), mention, chains.value(&gold, mention)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::fixtures::{engine, mention, with_mentions};
    use reconcile::Features;

    fn gold(spans: &[(usize, usize, &str, Option<&str>)]) -> AnnotationSet {
        let mut set = AnnotationSet::new(names::GOLD_NPS);
        for (start, end, id, reference) in spans {
            let mut features = Features::new();
            features.insert(ID_ATTRIBUTE.to_string(), id.to_string());
            if let Some(reference) = reference {
                features.insert(REF_ATTRIBUTE.to_string(), reference.to_string());
            }
            set.add_span_with_features(*start, *end, "COREF", features).unwrap();
        }
        set
    }

    #[test]
    fn test_chains_follow_ref_links() {
        let text = "John Smith said he would call the senator about Acme";
        let mut doc = Document::from_text("g", text).unwrap();
        let gold = gold(&[
            (0, 10, "1", None),
            (16, 18, "2", Some("1")),
            (30, 41, "3", Some("2")),
            (48, 52, "4", None),
        ]);
        doc.add_annotation_set(gold, names::GOLD_NPS, false).unwrap();
        with_mentions(&mut doc, &["John Smith", "he", "the senator", "senator", "call"]);
        let mut engine = engine();

        let cases = [
            ("John Smith", Some("1")),
            ("he", Some("1")),
            ("the senator", Some("1")),
            ("senator", Some("1")),
            ("call", None),
        ];
        for (phrase, chain) in cases {
            let np = mention(&mut doc, phrase);
            assert_eq!(
                engine.text(PropertyId::CorefId, &np, &mut doc).unwrap().as_deref(),
                chain,
                "{phrase}"
            );
        }
    }
}
