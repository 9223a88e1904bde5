//! Tiny Core
//!
//! Central coordination layer for the Tiny browser.
//! Rust owns the address bar and navigation state; the web view is a renderer.

mod browser;
mod config;
mod error;

pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;

// Re-export navigation components
pub use tiny_navigation::{
    interpret, EngineEvent, InputInterpreter, InputResolution, InterpretMode, LoadOutcome,
    NavigationEngine, NavigationError, NavigationFacade, NavigationId, NavigationState,
    NavigationTarget, Url,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Logs go to stderr; stdout is reserved for the shell's JSON output.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
