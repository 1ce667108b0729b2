//! Log output for pipeline runs.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Install a formatting subscriber filtered by `RUST_LOG`.
///
/// Returns false when a global subscriber is already installed.
pub fn init() -> bool {
    init_with_default(DEFAULT_DIRECTIVE)
}

pub fn init_with_default(directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
