//! Application state management
use parking_lot::RwLock;
use std::sync::Arc;
use tiny_core::{Browser, Config, CoreError, Result};

use crate::engine::HeadlessEngine;

pub type ShellBrowser = Browser<HeadlessEngine>;

/// Shared application state wrapper
pub struct AppState {
    browser: Arc<RwLock<Option<ShellBrowser>>>,
}

impl AppState {
    pub fn new(config: Config, engine: HeadlessEngine) -> Result<Self> {
        let browser = Browser::new(config, engine)?;

        Ok(Self {
            browser: Arc::new(RwLock::new(Some(browser))),
        })
    }

    pub fn with_browser<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ShellBrowser) -> Result<T>,
    {
        let guard = self.browser.read();
        match guard.as_ref() {
            Some(browser) => f(browser),
            None => Err(CoreError::NotInitialized),
        }
    }

    pub fn with_browser_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut ShellBrowser) -> Result<T>,
    {
        let mut guard = self.browser.write();
        match guard.as_mut() {
            Some(browser) => f(browser),
            None => Err(CoreError::NotInitialized),
        }
    }

    /// Tear down the browser; later commands report `NotInitialized`.
    pub fn shutdown(&self) {
        self.browser.write().take();
    }
}
