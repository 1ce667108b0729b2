//! Configuration and corpus driver for Reconcile.
//!
//! A [`SystemConfig`] names the feature set, pair generator, writer,
//! classifier and clusterer of a run. [`Pipeline::run_corpus`] walks the
//! documents of a corpus list, writing each document's feature file and,
//! outside training, its resolved `coref` chains.
//!
//! ## Modules
//!
//! - [`config`] - TOML system configuration
//! - [`loader`] - corpus list files
//! - [`runner`] - per-document and corpus drivers
//! - [`logging`] - `tracing` subscriber setup

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod runner;

pub use config::SystemConfig;
pub use error::{PipelineError, PipelineResult};
pub use loader::load_corpus;
pub use runner::{render_chains, DocumentReport, Pipeline, RELATION};
