//! Tiny Navigation
//!
//! - Address bar interpretation:
//!   1. `http(s)://` URL → navigate as typed
//!   2. Bare domain → navigate over https
//!   3. Anything else → search
//! - Navigation facade over an embedded engine, with a redundant-load guard

mod engine;
mod error;
mod facade;
mod input;
mod state;
mod target;

pub use engine::{EngineEvent, NavigationEngine, NavigationId};
pub use error::NavigationError;
pub use facade::{LoadOutcome, NavigationFacade};
pub use input::{
    interpret, InputInterpreter, InputResolution, InterpretMode, DEFAULT_SEARCH_TEMPLATE,
};
pub use state::NavigationState;
pub use target::NavigationTarget;

pub use url::Url;

pub type Result<T> = std::result::Result<T, NavigationError>;
