//! Navigation and address bar commands

use serde::Serialize;

use tiny_core::{EngineEvent, InputResolution, LoadOutcome};

use super::CommandResult;
use crate::state::{AppState, ShellBrowser};

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum InputResolutionResult {
    Navigate(String),
    Search { query: String, url: String },
}

impl From<InputResolution> for InputResolutionResult {
    fn from(resolution: InputResolution) -> Self {
        match resolution {
            InputResolution::Navigate(target) => InputResolutionResult::Navigate(target.into()),
            InputResolution::Search { query, target } => InputResolutionResult::Search {
                query,
                url: target.into(),
            },
        }
    }
}

/// Snapshot of what the address bar and toolbar should show
#[derive(Debug, Serialize)]
pub struct NavigationStateInfo {
    pub address: String,
    pub url: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub loaded_at: Option<String>,
}

impl NavigationStateInfo {
    fn capture(browser: &ShellBrowser) -> Self {
        let state = browser.navigation_state();
        Self {
            address: browser.address_text().to_string(),
            url: state.current.as_ref().map(|t| t.as_str().to_string()),
            can_go_back: state.can_go_back,
            can_go_forward: state.can_go_forward,
            is_loading: state.is_loading,
            last_error: state.last_error.clone(),
            loaded_at: state.loaded_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitInfo {
    pub outcome: LoadOutcome,
    pub state: NavigationStateInfo,
}

#[derive(Debug, Serialize)]
pub struct TraversalInfo {
    /// Whether the engine was asked to do anything
    pub moved: bool,
    pub state: NavigationStateInfo,
}

pub fn resolve_input(state: &AppState, input: &str) -> CommandResult<InputResolutionResult> {
    state
        .with_browser(|browser| browser.resolve_input(input))
        .map(InputResolutionResult::from)
        .into()
}

/// Initial load of the configured homepage
pub fn appear(state: &AppState) -> CommandResult<SubmitInfo> {
    state
        .with_browser_mut(|browser| {
            let outcome = browser.on_appear()?;
            Ok(SubmitInfo {
                outcome,
                state: NavigationStateInfo::capture(browser),
            })
        })
        .into()
}

pub fn submit_address(state: &AppState, input: &str) -> CommandResult<SubmitInfo> {
    state
        .with_browser_mut(|browser| {
            let outcome = browser.submit(input)?;
            Ok(SubmitInfo {
                outcome,
                state: NavigationStateInfo::capture(browser),
            })
        })
        .into()
}

pub fn reload(state: &AppState) -> CommandResult<TraversalInfo> {
    traverse(state, ShellBrowser::reload)
}

pub fn go_back(state: &AppState) -> CommandResult<TraversalInfo> {
    traverse(state, ShellBrowser::go_back)
}

pub fn go_forward(state: &AppState) -> CommandResult<TraversalInfo> {
    traverse(state, ShellBrowser::go_forward)
}

fn traverse<F>(state: &AppState, op: F) -> CommandResult<TraversalInfo>
where
    F: FnOnce(&mut ShellBrowser) -> tiny_core::Result<bool>,
{
    state
        .with_browser_mut(|browser| {
            let moved = op(browser)?;
            Ok(TraversalInfo {
                moved,
                state: NavigationStateInfo::capture(browser),
            })
        })
        .into()
}

pub fn navigation_state(state: &AppState) -> CommandResult<NavigationStateInfo> {
    state
        .with_browser(|browser| Ok(NavigationStateInfo::capture(browser)))
        .into()
}

/// Feed an engine callback into the core. Failed navigations come back as errors.
pub fn engine_event(state: &AppState, event: EngineEvent) -> CommandResult<NavigationStateInfo> {
    let result = state.with_browser_mut(|browser| {
        let failure = browser.handle_engine_event(event);
        Ok((failure, NavigationStateInfo::capture(browser)))
    });

    match result {
        Ok((Some(failure), _)) => CommandResult::err(failure.to_string()),
        Ok((None, info)) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
