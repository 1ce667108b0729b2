//! Per-document and corpus drivers.

use std::path::PathBuf;
use std::sync::Arc;

use reconcile::{bytespan, AnnotationSet, AnnotationSetDisplay};
use reconcile_document::{names, Document, DocumentError, DocumentLayout, SetNameMap};
use reconcile_features::{
    attach_doc_no, classifier_by_name, clusterer_by_name, extract, feature_writer,
    pair_generator, read_arff, write_feature_file, write_predictions, FeatureContext,
    FeatureRegistry, FeatureSet,
};
use reconcile_properties::{PropertyEngine, PropertyRegistry};
use tracing::{debug, error, info, trace, Level};

use crate::{PipelineResult, SystemConfig};

/// Relation name written into every feature file.
pub const RELATION: &str = "reconcile";

/// Outcome of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub doc: String,
    pub instances: usize,
    pub feature_file: PathBuf,
    /// Chains found, when the document was resolved.
    pub chains: Option<usize>,
}

/// Configured components shared by every document of a run.
#[derive(Debug)]
pub struct Pipeline {
    config: SystemConfig,
    properties: Arc<PropertyRegistry>,
    features: FeatureRegistry,
    names: Arc<SetNameMap>,
}

impl Pipeline {
    pub fn new(config: SystemConfig) -> PipelineResult<Self> {
        let properties = Arc::new(PropertyRegistry::standard()?);
        let names = Arc::new(config.set_names.clone());
        Ok(Self {
            config,
            properties,
            features: FeatureRegistry::standard(),
            names,
        })
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// A stored document using the configured set names.
    pub fn open_document(&self, root: impl Into<PathBuf>) -> Document {
        Document::open(root).with_names(Arc::clone(&self.names))
    }

    fn feature_set(&self) -> PipelineResult<FeatureSet> {
        Ok(self.features.build(self.config.features()?)?)
    }

    /// Generate pairs and features for `doc` and write its feature file.
    ///
    /// `number` is the document's position in the corpus.
    pub fn run_document(&self, doc: &mut Document, number: usize) -> PipelineResult<DocumentReport> {
        let feature_set = self.config.feature_set()?;
        let features = self.feature_set()?;
        let mut generator =
            pair_generator(self.config.pair_generator()?, self.config.window)?;
        let writer = feature_writer(&self.config.writer)?;
        let path = layout_of(doc)?.feature_file(feature_set);

        attach_doc_no(doc, number)?;
        let mut engine = PropertyEngine::new(Arc::clone(&self.properties));
        let instances = {
            let mut ctx = FeatureContext::new(doc, &mut engine, self.config.training);
            extract(generator.as_mut(), &features, &mut ctx)?
        };
        write_feature_file(&path, writer.as_ref(), RELATION, &features, &instances.rows)?;
        debug!(
            doc = %doc.id(),
            instances = instances.len(),
            cached = engine.cache_len(),
            "wrote feature file"
        );
        Ok(DocumentReport {
            doc: doc.id().to_string(),
            instances: instances.len(),
            feature_file: path,
            chains: None,
        })
    }

    /// Classify the document's feature file, cluster the scored pairs and
    /// persist the resulting `coref` set.
    pub fn resolve_document(&self, doc: &mut Document) -> PipelineResult<Arc<AnnotationSet>> {
        let feature_set = self.config.feature_set()?;
        let classifier_name = self.config.classifier()?;
        let model = self.config.model()?;
        let clusterer_name = self.config.clusterer()?;
        let layout = layout_of(doc)?;

        let table = read_arff(&layout.feature_file(feature_set))?;
        let pairs = table.pair_ids()?;
        let predictions = layout.prediction_file(feature_set, classifier_name, model);
        let classifier = classifier_by_name(classifier_name, &predictions)?;
        let scores = classifier.test(&table)?;
        if classifier_name != "PredictionFile" {
            write_predictions(&predictions, &scores)?;
        }

        let mentions = doc.require_set(names::NPS)?;
        let clusterer = clusterer_by_name(clusterer_name, self.config.threshold)?;
        let chains = clusterer.cluster(&mentions, &pairs, &scores)?;
        let clusters = layout
            .clusters_dir(feature_set, classifier_name, model, clusterer_name)
            .join(names::COREF);
        bytespan::write_file(&clusters, &chains)?;
        let chains = doc.add_annotation_set(chains, names::COREF, true)?;
        debug!(doc = %doc.id(), pairs = pairs.len(), clusterer = clusterer.name(), "resolved");
        if tracing::enabled!(Level::TRACE) {
            let rendered = render_chains(doc)?;
            trace!(doc = %doc.id(), "chains\n{}", rendered);
        }
        Ok(chains)
    }

    /// Process every document in order; the first failure aborts the run.
    ///
    /// Outside training, each document is resolved after extraction.
    pub fn run_corpus(&self, documents: &[PathBuf]) -> PipelineResult<Vec<DocumentReport>> {
        let mut reports = Vec::with_capacity(documents.len());
        for (number, root) in documents.iter().enumerate() {
            let mut doc = self.open_document(root);
            let report = self.process(&mut doc, number).map_err(|e| {
                error!(doc = %doc.id(), error = %e, "document failed");
                e
            })?;
            reports.push(report);
        }
        info!(documents = reports.len(), "corpus done");
        Ok(reports)
    }

    fn process(&self, doc: &mut Document, number: usize) -> PipelineResult<DocumentReport> {
        let mut report = self.run_document(doc, number)?;
        if !self.config.training {
            let chains = self.resolve_document(doc)?;
            report.chains = Some(count_chains(&chains));
        }
        Ok(report)
    }
}

fn layout_of(doc: &Document) -> PipelineResult<DocumentLayout> {
    doc.layout().cloned().ok_or_else(|| {
        DocumentError::NoStorage {
            doc: doc.id().to_string(),
        }
        .into()
    })
}

/// The document's `coref` set drawn under its text, each mention linked to
/// the head of its chain.
pub fn render_chains(doc: &mut Document) -> PipelineResult<String> {
    let text = doc.raw_text()?;
    let chains = doc.require_set(names::COREF)?;
    Ok(AnnotationSetDisplay::new(&text)
        .with_links(&chains, "CorefID")
        .to_string())
}

fn count_chains(set: &AnnotationSet) -> usize {
    let mut ids: Vec<&str> = set
        .iter()
        .filter_map(|mention| mention.attribute("CorefID"))
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}
