//! The document facade.
//!
//! A `Document` owns the raw text of one input plus a registry of named
//! annotation sets. Both are loaded lazily from the document directory and
//! cached for the document's lifetime.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reconcile::{bytespan, Annotation, AnnotationSet, SpanKey};
use tracing::{debug, trace};

use crate::error::{DocumentError, DocumentResult};
use crate::layout::DocumentLayout;
use crate::names::SetNameMap;
use crate::text::normalize_annot_text;

/// Free-form document metadata, persisted as RON.
pub type Metadata = BTreeMap<String, String>;

/// Raw text plus lazily loaded annotation sets.
pub struct Document {
    id: String,
    layout: Option<DocumentLayout>,
    names: Arc<SetNameMap>,
    raw_text: Option<Arc<str>>,
    sets: HashMap<String, Arc<AnnotationSet>>,
    metadata: Option<Metadata>,
    /// Normalized span text, keyed per span.
    text_content: HashMap<SpanKey, Arc<str>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("root", &self.layout.as_ref().map(|l| l.root()))
            .field("loaded_sets", &self.sets.len())
            .field("text_loaded", &self.raw_text.is_some())
            .finish()
    }
}

impl Document {
    /// A document stored under `root`. Nothing is read until first access.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let id = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Self {
            id,
            layout: Some(DocumentLayout::new(root)),
            names: Arc::new(SetNameMap::default()),
            raw_text: None,
            sets: HashMap::new(),
            metadata: None,
            text_content: HashMap::new(),
        }
    }

    /// A document that lives only in memory.
    ///
    /// Empty text is rejected the same way an empty `raw.txt` is.
    pub fn from_text(id: impl Into<String>, text: impl Into<String>) -> DocumentResult<Self> {
        let id = id.into();
        let text: String = text.into();
        if text.is_empty() {
            return Err(DocumentError::EmptyText { doc: id });
        }
        Ok(Self {
            id,
            layout: None,
            names: Arc::new(SetNameMap::default()),
            raw_text: Some(Arc::from(text)),
            sets: HashMap::new(),
            metadata: Some(Metadata::new()),
            text_content: HashMap::new(),
        })
    }

    /// Use a set name mapping shared across the corpus.
    pub fn with_names(mut self, names: Arc<SetNameMap>) -> Self {
        self.names = names;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn layout(&self) -> Option<&DocumentLayout> {
        self.layout.as_ref()
    }

    pub fn root(&self) -> Option<&Path> {
        self.layout.as_ref().map(DocumentLayout::root)
    }

    fn require_layout(&self) -> DocumentResult<&DocumentLayout> {
        self.layout.as_ref().ok_or_else(|| DocumentError::NoStorage {
            doc: self.id.clone(),
        })
    }

    /// Resolve a logical set name through the name mapping.
    pub fn canonical_name(&self, name: &str) -> String {
        self.names.canonical(name).to_string()
    }

    // ========================================================================
    // Raw text
    // ========================================================================

    /// The raw text, read on first access.
    ///
    /// An empty text is a configuration error and is reported immediately.
    pub fn raw_text(&mut self) -> DocumentResult<Arc<str>> {
        if let Some(text) = &self.raw_text {
            return Ok(Arc::clone(text));
        }
        let path = self.require_layout()?.raw_text();
        let text = fs::read_to_string(&path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if text.is_empty() {
            return Err(DocumentError::EmptyText {
                doc: self.id.clone(),
            });
        }
        debug!(doc = %self.id, len = text.len(), "loaded raw text");
        let text: Arc<str> = Arc::from(text);
        self.raw_text = Some(Arc::clone(&text));
        Ok(text)
    }

    /// The raw slice of text under a span.
    pub fn annot_string(&mut self, span: &Annotation) -> DocumentResult<String> {
        let text = self.raw_text()?;
        text.get(span.start()..span.end())
            .map(str::to_string)
            .ok_or_else(|| DocumentError::OffsetOutOfRange {
                doc: self.id.clone(),
                start: span.start(),
                end: span.end(),
                len: text.len(),
            })
    }

    /// Normalized text under a span, cached per span.
    ///
    /// See [`normalize_annot_text`] for the normalization rules.
    pub fn annot_text(&mut self, span: &Annotation) -> DocumentResult<Arc<str>> {
        if let Some(cached) = self.text_content.get(&span.key()) {
            return Ok(Arc::clone(cached));
        }
        let raw = self.annot_string(span)?;
        let normalized: Arc<str> = Arc::from(normalize_annot_text(&raw));
        self.text_content.insert(span.key(), Arc::clone(&normalized));
        Ok(normalized)
    }

    // ========================================================================
    // Annotation sets
    // ========================================================================

    /// Look up a set by logical name, loading it from storage on first use.
    ///
    /// Returns `Ok(None)` when the set is neither cached nor persisted.
    pub fn annotation_set(&mut self, name: &str) -> DocumentResult<Option<Arc<AnnotationSet>>> {
        let canonical = self.canonical_name(name);
        if let Some(set) = self.sets.get(&canonical) {
            trace!(doc = %self.id, set = %canonical, "annotation set cache hit");
            return Ok(Some(Arc::clone(set)));
        }
        let path = match &self.layout {
            Some(layout) => layout.annotation_file(&canonical),
            None => return Ok(None),
        };
        if !path.is_file() {
            return Ok(None);
        }
        let set = Arc::new(bytespan::read_file(&canonical, &path)?);
        self.sets.insert(canonical, Arc::clone(&set));
        Ok(Some(set))
    }

    /// Like [`annotation_set`](Self::annotation_set) but a missing set is an error.
    pub fn require_set(&mut self, name: &str) -> DocumentResult<Arc<AnnotationSet>> {
        self.annotation_set(name)?
            .ok_or_else(|| DocumentError::MissingAnnotationSet {
                doc: self.id.clone(),
                name: self.canonical_name(name),
            })
    }

    /// Whether a set is cached or persisted.
    pub fn has_annotation_set(&self, name: &str) -> bool {
        let canonical = self.canonical_name(name);
        self.sets.contains_key(&canonical)
            || self
                .layout
                .as_ref()
                .map_or(false, |l| l.annotation_file(&canonical).is_file())
    }

    /// Attach a set under `name`; it is written to storage iff `persist`.
    pub fn add_annotation_set(
        &mut self,
        mut set: AnnotationSet,
        name: &str,
        persist: bool,
    ) -> DocumentResult<Arc<AnnotationSet>> {
        let canonical = self.canonical_name(name);
        set.set_name(canonical.clone());
        if persist {
            let path = self.require_layout()?.annotation_file(&canonical);
            bytespan::write_file(&path, &set)?;
        }
        let set = Arc::new(set);
        self.sets.insert(canonical, Arc::clone(&set));
        Ok(set)
    }

    /// Drop a set from the in-memory cache; storage is untouched.
    pub fn detach_annotation_set(&mut self, name: &str) -> Option<Arc<AnnotationSet>> {
        let canonical = self.canonical_name(name);
        self.sets.remove(&canonical)
    }

    /// Names of sets currently cached, sorted.
    pub fn loaded_set_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    fn load_metadata(&mut self) -> DocumentResult<&mut Metadata> {
        if self.metadata.is_none() {
            let path = self.require_layout()?.metadata();
            let metadata = if path.is_file() {
                let content = fs::read_to_string(&path).map_err(|source| DocumentError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                ron::from_str(&content).map_err(|e| DocumentError::Metadata {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            } else {
                Metadata::new()
            };
            self.metadata = Some(metadata);
        }
        Ok(self.metadata.get_or_insert_with(Metadata::new))
    }

    pub fn meta(&mut self, key: &str) -> DocumentResult<Option<String>> {
        Ok(self.load_metadata()?.get(key).cloned())
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<String>) -> DocumentResult<()> {
        self.load_metadata()?.insert(key.into(), value.into());
        Ok(())
    }

    /// Write metadata to `meta.ron`.
    pub fn save_metadata(&mut self) -> DocumentResult<()> {
        let path = self.require_layout()?.metadata();
        let metadata = self.load_metadata()?.clone();
        let config = ron::ser::PrettyConfig::new().depth_limit(2);
        let content =
            ron::ser::to_string_pretty(&metadata, config).map_err(|e| DocumentError::Metadata {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        fs::write(&path, content).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Remove every derived artifact: annotation sets, features, predictions
    /// and clusters. The raw text stays.
    pub fn clean(&mut self) -> DocumentResult<()> {
        self.sets.clear();
        self.text_content.clear();
        let layout = match &self.layout {
            Some(layout) => layout.clone(),
            None => return Ok(()),
        };
        for dir in layout.derived_dirs().iter() {
            if dir.is_dir() {
                fs::remove_dir_all(dir).map_err(|source| DocumentError::Io {
                    path: dir.display().to_string(),
                    source,
                })?;
            }
        }
        debug!(doc = %self.id, "cleaned derived artifacts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{NPS, POSTAG};
    use std::fs;

    fn on_disk(text: &str) -> (tempfile::TempDir, Document) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("doc7");
        fs::create_dir_all(root.join("annotations")).unwrap();
        fs::write(root.join("raw.txt"), text).unwrap();
        (dir, Document::open(root))
    }

    #[test]
    fn test_lazy_text_and_sets() {
        let (_dir, mut doc) = on_disk("The book on the table.");
        fs::write(
            doc.root().unwrap().join("annotations").join(NPS),
            "1\t0,21\tstring\tNP\t\n2\t12,21\tstring\tNP\t\n",
        )
        .unwrap();

        assert_eq!(doc.id(), "doc7");
        assert_eq!(&*doc.raw_text().unwrap(), "The book on the table.");

        let nps = doc.annotation_set(NPS).unwrap().unwrap();
        assert_eq!(nps.len(), 2);
        assert_eq!(doc.loaded_set_names(), vec![NPS]);

        // Second lookup hits the cache and returns the same set
        let again = doc.annotation_set(NPS).unwrap().unwrap();
        assert!(Arc::ptr_eq(&nps, &again));

        assert!(doc.annotation_set(POSTAG).unwrap().is_none());
        assert!(matches!(
            doc.require_set(POSTAG),
            Err(DocumentError::MissingAnnotationSet { .. })
        ));
    }

    #[test]
    fn test_empty_text_is_fatal() {
        let (_dir, mut doc) = on_disk("");
        assert!(matches!(doc.raw_text(), Err(DocumentError::EmptyText { .. })));
    }

    #[test]
    fn test_empty_in_memory_text_is_rejected() {
        let err = Document::from_text("blank", "").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"raw text of document 'blank' is empty");
    }

    #[test]
    fn test_name_mapping_resolves_before_lookup() {
        let (_dir, doc) = on_disk("Some text.");
        let names = Arc::new(SetNameMap::new().with(NPS, "Cogniac.nps"));
        let mut doc = doc.with_names(names);
        fs::write(
            doc.root().unwrap().join("annotations").join("Cogniac.nps"),
            "1\t0,4\tstring\tNP\t\n",
        )
        .unwrap();

        let nps = doc.annotation_set(NPS).unwrap().unwrap();
        assert_eq!(nps.name(), "Cogniac.nps");
        assert!(doc.has_annotation_set(NPS));
    }

    #[test]
    fn test_add_annotation_set_persist_flag() {
        let (_dir, mut doc) = on_disk("Some text.");
        let mut set = AnnotationSet::new("ignored");
        set.add_span(0, 4, "NP").unwrap();

        doc.add_annotation_set(set.clone(), "transient", false).unwrap();
        assert!(!doc.layout().unwrap().annotation_file("transient").exists());

        doc.add_annotation_set(set, "kept", true).unwrap();
        assert!(doc.layout().unwrap().annotation_file("kept").is_file());

        // A fresh document sees only the persisted set
        let mut reopened = Document::open(doc.root().unwrap().to_path_buf());
        assert!(reopened.annotation_set("transient").unwrap().is_none());
        assert_eq!(reopened.annotation_set("kept").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_annot_text_is_normalized_and_cached() {
        let mut doc = Document::from_text("mem", "He said, ``the  big\ndog.''").unwrap();
        let span = Annotation::new(1, 9, 26, "NP").unwrap();

        assert_eq!(doc.annot_string(&span).unwrap(), "``the  big\ndog.''");
        let first = doc.annot_text(&span).unwrap();
        assert_eq!(&*first, "the big dog");
        let second = doc.annot_text(&span).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let outside = Annotation::new(2, 20, 90, "NP").unwrap();
        assert!(matches!(
            doc.annot_string(&outside),
            Err(DocumentError::OffsetOutOfRange { len: 26, .. })
        ));
    }

    #[test]
    fn test_metadata_round_trip() {
        let (_dir, mut doc) = on_disk("Some text.");
        doc.set_meta("source", "MUC6").unwrap();
        doc.save_metadata().unwrap();

        let mut reopened = Document::open(doc.root().unwrap().to_path_buf());
        assert_eq!(reopened.meta("source").unwrap().as_deref(), Some("MUC6"));
        assert_eq!(reopened.meta("missing").unwrap(), None);
    }

    #[test]
    fn test_clean_keeps_raw_text() {
        let (_dir, mut doc) = on_disk("Some text.");
        let mut set = AnnotationSet::new(NPS);
        set.add_span(0, 4, "NP").unwrap();
        doc.add_annotation_set(set, NPS, true).unwrap();
        let layout = doc.layout().unwrap().clone();
        fs::create_dir_all(layout.features_dir("soon")).unwrap();

        doc.clean().unwrap();

        assert!(layout.raw_text().is_file());
        assert!(!layout.annotations_dir().exists());
        assert!(!layout.root().join("features").exists());
        assert!(doc.annotation_set(NPS).unwrap().is_none());
    }

    #[test]
    fn test_in_memory_document_cannot_persist() {
        let mut doc = Document::from_text("mem", "text").unwrap();
        let set = AnnotationSet::new(NPS);
        assert!(matches!(
            doc.add_annotation_set(set, NPS, true),
            Err(DocumentError::NoStorage { .. })
        ));
    }
}
