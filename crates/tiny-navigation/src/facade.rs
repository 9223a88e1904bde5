//! Navigation facade
//!
//! Owns the engine and the only mutable [`NavigationState`]. Every method runs
//! on the UI thread; engine progress comes back through [`handle_event`].
//! Only events tagged with the most recently issued navigation are applied.
//!
//! [`handle_event`]: NavigationFacade::handle_event

use chrono::Utc;
use serde::Serialize;

use crate::engine::{EngineEvent, NavigationEngine, NavigationId};
use crate::error::NavigationError;
use crate::state::NavigationState;
use crate::target::NavigationTarget;
use crate::Result;

/// Whether `load` actually sent a command to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOutcome {
    Issued,
    Unchanged,
}

pub struct NavigationFacade<E> {
    engine: E,
    state: NavigationState,
}

impl<E: NavigationEngine> NavigationFacade<E> {
    pub fn new(engine: E) -> Self {
        let mut facade = Self {
            engine,
            state: NavigationState::default(),
        };
        facade.refresh_history();
        facade
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Navigate to `target` unless it is already loaded.
    pub fn load(&mut self, target: NavigationTarget) -> Result<LoadOutcome> {
        if self.state.current.as_ref() == Some(&target) {
            tracing::debug!(url = %target, "Target already loaded, skipping");
            return Ok(LoadOutcome::Unchanged);
        }

        let id = self.engine.load(&target)?;
        tracing::info!(url = %target, navigation = %id, "Loading");

        self.state.current = Some(target);
        self.state.is_loading = true;
        self.state.last_error = None;
        self.state.loaded_at = Some(Utc::now());
        self.state.pending = Some(id);
        self.refresh_history();

        Ok(LoadOutcome::Issued)
    }

    /// Re-fetch the current target. Returns `false` if nothing is loaded.
    pub fn reload(&mut self) -> Result<bool> {
        let Some(current) = self.state.current.as_ref() else {
            return Ok(false);
        };

        tracing::info!(url = %current, "Reloading");
        let id = self.engine.reload()?;
        self.state.is_loading = true;
        self.state.last_error = None;
        self.state.pending = Some(id);
        Ok(true)
    }

    pub fn go_back(&mut self) -> Result<bool> {
        if !self.engine.can_go_back() {
            return Ok(false);
        }

        let id = self.engine.go_back()?;
        self.sync_from_engine(id);
        tracing::info!(url = %self.state.display_url(), "Went back");
        Ok(true)
    }

    pub fn go_forward(&mut self) -> Result<bool> {
        if !self.engine.can_go_forward() {
            return Ok(false);
        }

        let id = self.engine.go_forward()?;
        self.sync_from_engine(id);
        tracing::info!(url = %self.state.display_url(), "Went forward");
        Ok(true)
    }

    pub fn can_go_back(&self) -> bool {
        self.engine.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.engine.can_go_forward()
    }

    /// Whether `event` belongs to the navigation issued last.
    pub fn is_current(&self, event: &EngineEvent) -> bool {
        self.state.pending == Some(event.id())
    }

    /// Apply an engine callback. A failed navigation is returned so the caller
    /// can surface it; it is not retried. Events from a superseded navigation
    /// are dropped.
    pub fn handle_event(&mut self, event: EngineEvent) -> Option<NavigationError> {
        if !self.is_current(&event) {
            tracing::debug!(
                navigation = %event.id(),
                url = %event.url(),
                "Ignoring event from superseded navigation"
            );
            return None;
        }

        match event {
            EngineEvent::Started { .. } => {
                self.state.is_loading = true;
            }
            EngineEvent::Committed { url, .. } => {
                if self.state.current.as_ref().map_or(true, |t| *t != url) {
                    tracing::debug!(url = %url, "Engine committed to a different URL");
                    self.state.current = Some(NavigationTarget::from_url(url));
                }
            }
            EngineEvent::Finished { .. } => {
                self.state.is_loading = false;
            }
            EngineEvent::Failed { url, reason, .. } => {
                tracing::warn!(url = %url, reason = %reason, "Navigation failed");
                self.state.is_loading = false;
                self.state.last_error = Some(reason.clone());
                self.refresh_history();
                return Some(NavigationError::NavigationFailed {
                    url: url.to_string(),
                    reason,
                });
            }
        }

        self.refresh_history();
        None
    }

    fn sync_from_engine(&mut self, id: NavigationId) {
        self.state.current = self.engine.current_url().map(NavigationTarget::from_url);
        self.state.is_loading = true;
        self.state.last_error = None;
        self.state.pending = Some(id);
        self.refresh_history();
    }

    fn refresh_history(&mut self) {
        self.state.can_go_back = self.engine.can_go_back();
        self.state.can_go_forward = self.engine.can_go_forward();
    }
}
