//! Clusterer contract.
//!
//! Scored pairs become coreference chains: every input mention is copied into
//! a `coref` set with its `CorefID` attribute set to the id of the first
//! mention of its chain.

use std::collections::HashMap;

use reconcile::{AnnotationId, AnnotationSet};
use reconcile_document::names;
use reconcile_properties::PropertyId;
use tracing::{debug, warn};

use crate::{FeatureError, FeatureResult};

/// Scores at or above this value link a pair.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

pub trait Clusterer {
    fn name(&self) -> &'static str;

    /// Chains over `mentions` from `(antecedent, anaphor)` pairs and their
    /// scores, index for index.
    fn cluster(
        &self,
        mentions: &AnnotationSet,
        pairs: &[(AnnotationId, AnnotationId)],
        scores: &[f64],
    ) -> FeatureResult<AnnotationSet>;
}

// ============================================================================
// Union-find over mention positions
// ============================================================================

struct Chains {
    parent: Vec<usize>,
}

impl Chains {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn root(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// The earlier position stays the root.
    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.root(a), self.root(b));
        if ra != rb {
            let (keep, merge) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[merge] = keep;
        }
    }
}

/// Pairs resolved to mention positions with their scores.
fn scored_links(
    mentions: &AnnotationSet,
    pairs: &[(AnnotationId, AnnotationId)],
    scores: &[f64],
) -> FeatureResult<Vec<(usize, usize, f64)>> {
    if pairs.len() != scores.len() {
        return Err(FeatureError::PredictionCount {
            expected: pairs.len(),
            found: scores.len(),
        });
    }
    let positions: HashMap<AnnotationId, usize> = mentions
        .iter()
        .enumerate()
        .map(|(idx, mention)| (mention.id(), idx))
        .collect();
    let mut links = Vec::with_capacity(pairs.len());
    for ((antecedent, anaphor), score) in pairs.iter().zip(scores) {
        match (positions.get(antecedent), positions.get(anaphor)) {
            (Some(a), Some(b)) => links.push((*a, *b, *score)),
            _ => warn!(antecedent, anaphor, "pair refers to an unknown mention"),
        }
    }
    Ok(links)
}

/// Copy `mentions` into the output set labelled by chain.
fn chains_to_set(mentions: &AnnotationSet, chains: &mut Chains) -> FeatureResult<AnnotationSet> {
    let ordered = mentions.to_vec();
    let mut out = AnnotationSet::new(names::COREF);
    for (idx, mention) in ordered.iter().enumerate() {
        let root = &ordered[chains.root(idx)];
        let mut copy = mention.clone();
        copy.set_attribute(PropertyId::CorefId.name(), root.id().to_string());
        out.add_ref(copy)?;
    }
    Ok(out)
}

/// Links every pair scoring at least the threshold; chains are the
/// transitive closure.
#[derive(Debug, Clone, Copy)]
pub struct SingleLink {
    pub threshold: f64,
}

impl Default for SingleLink {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Clusterer for SingleLink {
    fn name(&self) -> &'static str {
        "SingleLink"
    }

    fn cluster(
        &self,
        mentions: &AnnotationSet,
        pairs: &[(AnnotationId, AnnotationId)],
        scores: &[f64],
    ) -> FeatureResult<AnnotationSet> {
        let mut chains = Chains::new(mentions.len());
        let mut linked = 0;
        for (a, b, score) in scored_links(mentions, pairs, scores)? {
            if score >= self.threshold {
                chains.union(a, b);
                linked += 1;
            }
        }
        debug!(mentions = mentions.len(), linked, "single-link clustering");
        chains_to_set(mentions, &mut chains)
    }
}

/// Links each anaphor to its highest-scoring antecedent above the threshold;
/// ties go to the closer antecedent.
#[derive(Debug, Clone, Copy)]
pub struct BestFirst {
    pub threshold: f64,
}

impl Default for BestFirst {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Clusterer for BestFirst {
    fn name(&self) -> &'static str {
        "BestFirst"
    }

    fn cluster(
        &self,
        mentions: &AnnotationSet,
        pairs: &[(AnnotationId, AnnotationId)],
        scores: &[f64],
    ) -> FeatureResult<AnnotationSet> {
        let mut best: HashMap<usize, (usize, f64)> = HashMap::new();
        for (a, b, score) in scored_links(mentions, pairs, scores)? {
            if score < self.threshold {
                continue;
            }
            let better = match best.get(&b) {
                Some((prev, prev_score)) => score > *prev_score || (score == *prev_score && a > *prev),
                None => true,
            };
            if better {
                best.insert(b, (a, score));
            }
        }
        let mut chains = Chains::new(mentions.len());
        for (anaphor, (antecedent, _)) in &best {
            chains.union(*antecedent, *anaphor);
        }
        debug!(mentions = mentions.len(), linked = best.len(), "best-first clustering");
        chains_to_set(mentions, &mut chains)
    }
}

/// Construct a clusterer by its configured name.
pub fn clusterer_by_name(name: &str, threshold: f64) -> FeatureResult<Box<dyn Clusterer>> {
    match name {
        "SingleLink" => Ok(Box::new(SingleLink { threshold })),
        "BestFirst" => Ok(Box::new(BestFirst { threshold })),
        other => Err(FeatureError::UnknownClusterer(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mentions() -> AnnotationSet {
        let mut set = AnnotationSet::new(names::NPS);
        for start in [0, 10, 20, 30] {
            set.add_span(start, start + 5, "NP").unwrap();
        }
        set
    }

    fn chain_ids(set: &AnnotationSet) -> Vec<(AnnotationId, String)> {
        set.iter()
            .map(|m| (m.id(), m.attribute("CorefID").unwrap_or_default().to_string()))
            .collect()
    }

    const PAIRS: &[(AnnotationId, AnnotationId)] = &[(1, 2), (2, 3), (1, 3), (3, 4), (2, 4), (1, 4)];

    #[test]
    fn test_single_link_closes_transitively() {
        let scores = [0.9, 0.0, 0.0, 0.0, 0.7, 0.0];
        let set = SingleLink::default().cluster(&mentions(), PAIRS, &scores).unwrap();
        assert_eq!(set.name(), "coref");
        assert_eq!(
            chain_ids(&set),
            vec![
                (1, "1".to_string()),
                (2, "1".to_string()),
                (3, "3".to_string()),
                (4, "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_best_first_keeps_one_antecedent() {
        // 4 scores 3 highest; 3 has no antecedent above threshold
        let scores = [0.6, 0.2, 0.4, 0.95, 0.8, 0.8];
        let set = BestFirst::default().cluster(&mentions(), PAIRS, &scores).unwrap();
        assert_eq!(
            chain_ids(&set),
            vec![
                (1, "1".to_string()),
                (2, "1".to_string()),
                (3, "3".to_string()),
                (4, "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_best_first_tie_prefers_closer() {
        let pairs = [(1, 4), (2, 4)];
        let set = BestFirst::default()
            .cluster(&mentions(), &pairs, &[0.7, 0.7])
            .unwrap();
        assert_eq!(set.by_id(4).unwrap().attribute("CorefID"), Some("2"));
        assert_eq!(set.by_id(1).unwrap().attribute("CorefID"), Some("1"));
    }

    #[test]
    fn test_score_count_must_match() {
        let err = SingleLink::default()
            .cluster(&mentions(), PAIRS, &[1.0])
            .unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"expected 6 predictions, found 1");
    }

    #[test]
    fn test_unknown_clusterer() {
        assert!(matches!(
            clusterer_by_name("Greedy", 0.5),
            Err(FeatureError::UnknownClusterer(name)) if name == "Greedy"
        ));
    }
}
