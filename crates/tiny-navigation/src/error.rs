//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Nothing to navigate to")]
    EmptyInput,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid search template (missing %s): {0}")]
    InvalidSearchTemplate(String),

    #[error("Navigation to {url} failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    #[error("Engine error: {0}")]
    Engine(String),
}
