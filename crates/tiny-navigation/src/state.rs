//! Navigation state mirrored to the UI
//!
//! ```text
//! Unloaded
//!   ↓ load(t)
//! Loaded(t) ──load(t')──▶ Loaded(t')
//!   ↺ load(t)   (no-op)
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::NavigationId;
use crate::target::NavigationTarget;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    /// Currently loaded target; `None` until the first load
    pub current: Option<NavigationTarget>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    /// Reason of the most recent asynchronous failure
    pub last_error: Option<String>,
    /// When the last load command was issued
    pub loaded_at: Option<DateTime<Utc>>,
    /// Latest navigation issued; events from any other one are stale
    pub pending: Option<NavigationId>,
}

impl NavigationState {
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Address bar text for the current page
    pub fn display_url(&self) -> &str {
        self.current
            .as_ref()
            .map(NavigationTarget::as_str)
            .unwrap_or("")
    }
}
