//! Shell commands
//!
//! These commands bridge the address bar UI to the Rust core.
//! Every command returns a serializable [`CommandResult`].

pub mod navigation;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T> From<tiny_core::Result<T>> for CommandResult<T> {
    fn from(result: tiny_core::Result<T>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => CommandResult::err(e.to_string()),
        }
    }
}
