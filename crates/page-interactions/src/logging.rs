//! Native log output.
//!
//! The engine reports through `tracing`; hosts that run it natively (tests,
//! scripted drivers) install a formatter here. `RUST_LOG` wins over the
//! fallback filter.

use tracing_subscriber::EnvFilter;

use crate::error::{InteractionError, InteractionResult};

/// Default filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "page_interactions=info";

/// Install a global `fmt` subscriber filtered by `RUST_LOG` or `fallback`
///
/// Fails if a global subscriber is already installed or the filter does not
/// parse.
pub fn init_logging(fallback: &str) -> InteractionResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| InteractionError::config(format!("invalid log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| InteractionError::config(format!("logging already initialized: {e}")))
}

/// Install the subscriber for tests; repeated calls are harmless
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
