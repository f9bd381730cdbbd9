//! Tracing subscriber setup.
//!
//! Natively events go to stderr, filtered by `RUST_LOG`.  In the browser they
//! go to the developer console with the console method matching their level.

use tracing_subscriber::EnvFilter;

use crate::error::SiteError;

/// Install the global subscriber.  Fails if one is already installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() -> Result<(), SiteError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr) // never pollute stdout
        .try_init()
        .map_err(|_| SiteError::LoggingInit)
}

/// Install the global subscriber.  Fails if one is already installed.
#[cfg(target_arch = "wasm32")]
pub fn init() -> Result<(), SiteError> {
    // No environment and no wall clock in the browser.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(crate::web::console::ConsoleMakeWriter)
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .try_init()
        .map_err(|_| SiteError::LoggingInit)
}
