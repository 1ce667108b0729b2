//! Document-level abstractions for Reconcile.
//!
//! A [`Document`] is one input of the corpus: a raw text plus named
//! annotation sets (`nps`, `postag`, `parse`, `dep`, `ne`, `sentence`,
//! `paragraph`, ...), loaded lazily from the document directory and cached.
//!
//! ## Core Types
//!
//! - [`Document`] - raw text, annotation set registry and metadata
//! - [`DocumentLayout`] - where each artifact lives on disk
//! - [`SetNameMap`] - logical to on-disk set name mapping
//!
//! ## Example
//!
//! ```
//! use reconcile::Annotation;
//! use reconcile_document::Document;
//!
//! let mut doc = Document::from_text("d1", "``The senator,'' he said.").unwrap();
//! let np = Annotation::new(1, 0, 16, "NP").unwrap();
//! assert_eq!(&*doc.annot_text(&np).unwrap(), "The senator");
//! ```

mod document;
mod error;
mod layout;
pub mod names;
mod text;

pub use document::{Document, Metadata};
pub use error::{DocumentError, DocumentResult};
pub use layout::DocumentLayout;
pub use names::SetNameMap;
pub use text::{is_word_char, normalize_annot_text};
