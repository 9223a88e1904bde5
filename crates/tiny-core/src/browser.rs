//! Main browser state container
//!
//! Rust owns the address bar text and the navigation state; the embedded
//! engine only renders.

use tiny_navigation::{
    EngineEvent, InputInterpreter, InputResolution, LoadOutcome, NavigationEngine,
    NavigationError, NavigationFacade, NavigationState,
};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct Browser<E> {
    /// Configuration
    config: Config,
    /// Address bar interpreter
    interpreter: InputInterpreter,
    /// Facade over the embedded engine
    navigation: NavigationFacade<E>,
    /// Current address bar contents
    address_text: String,
}

impl<E: NavigationEngine> Browser<E> {
    pub fn new(config: Config, engine: E) -> Result<Self> {
        let mut interpreter = InputInterpreter::with_search_engine(config.search_engine.clone())
            .map_err(|e| CoreError::Config(e.to_string()))?;
        interpreter.set_mode(config.interpretation);

        let address_text = config.homepage.clone();

        Ok(Self {
            config,
            interpreter,
            navigation: NavigationFacade::new(engine),
            address_text,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initial load when the window appears
    pub fn on_appear(&mut self) -> Result<LoadOutcome> {
        tracing::info!(address = %self.address_text, "Window appeared");
        self.submit_address()
    }

    // === Address bar ===

    pub fn address_text(&self) -> &str {
        &self.address_text
    }

    pub fn set_address_text(&mut self, text: impl Into<String>) {
        self.address_text = text.into();
    }

    /// Interpret the address bar text and load it.
    ///
    /// Empty or unparseable input is an error and leaves the navigation state
    /// as it was.
    pub fn submit_address(&mut self) -> Result<LoadOutcome> {
        let target = self.interpreter.interpret(&self.address_text)?;
        Ok(self.navigation.load(target)?)
    }

    pub fn submit(&mut self, input: &str) -> Result<LoadOutcome> {
        self.set_address_text(input);
        self.submit_address()
    }

    /// Preview what `input` would resolve to without loading it
    pub fn resolve_input(&self, input: &str) -> Result<InputResolution> {
        Ok(self.interpreter.resolve(input)?)
    }

    // === Navigation ===

    pub fn reload(&mut self) -> Result<bool> {
        Ok(self.navigation.reload()?)
    }

    pub fn go_back(&mut self) -> Result<bool> {
        let moved = self.navigation.go_back()?;
        if moved {
            self.mirror_current_into_address();
        }
        Ok(moved)
    }

    pub fn go_forward(&mut self) -> Result<bool> {
        let moved = self.navigation.go_forward()?;
        if moved {
            self.mirror_current_into_address();
        }
        Ok(moved)
    }

    pub fn can_go_back(&self) -> bool {
        self.navigation.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.navigation.can_go_forward()
    }

    pub fn navigation_state(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub fn engine(&self) -> &E {
        self.navigation.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.navigation.engine_mut()
    }

    /// Apply an engine callback; returns the failure if the navigation failed.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Option<NavigationError> {
        let committed =
            matches!(event, EngineEvent::Committed { .. }) && self.navigation.is_current(&event);
        let failure = self.navigation.handle_event(event);
        if committed {
            self.mirror_current_into_address();
        }
        failure
    }

    fn mirror_current_into_address(&mut self) {
        if let Some(current) = &self.navigation.state().current {
            self.address_text = current.as_str().to_string();
        }
    }

    // === Settings ===

    pub fn search_engine(&self) -> &str {
        self.interpreter.search_template()
    }

    pub fn set_search_engine(&mut self, template: String) -> Result<()> {
        self.interpreter.set_search_engine(template.clone())?;
        self.config.search_engine = template;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_navigation::{InterpretMode, NavigationId, NavigationTarget, Url};

    #[derive(Default)]
    struct StubEngine {
        loads: Vec<String>,
        history: Vec<Url>,
        index: usize,
        issued: u64,
    }

    impl StubEngine {
        fn issue(&mut self) -> NavigationId {
            self.issued += 1;
            NavigationId(self.issued)
        }
    }

    impl NavigationEngine for StubEngine {
        fn load(&mut self, target: &NavigationTarget) -> tiny_navigation::Result<NavigationId> {
            self.loads.push(target.as_str().to_string());
            if !self.history.is_empty() {
                self.history.truncate(self.index + 1);
            }
            self.history.push(target.url().clone());
            self.index = self.history.len() - 1;
            Ok(self.issue())
        }

        fn reload(&mut self) -> tiny_navigation::Result<NavigationId> {
            Ok(self.issue())
        }

        fn go_back(&mut self) -> tiny_navigation::Result<NavigationId> {
            self.index -= 1;
            Ok(self.issue())
        }

        fn go_forward(&mut self) -> tiny_navigation::Result<NavigationId> {
            self.index += 1;
            Ok(self.issue())
        }

        fn can_go_back(&self) -> bool {
            self.index > 0
        }

        fn can_go_forward(&self) -> bool {
            self.index + 1 < self.history.len()
        }

        fn current_url(&self) -> Option<Url> {
            self.history.get(self.index).cloned()
        }
    }

    fn browser() -> Browser<StubEngine> {
        Browser::new(Config::default(), StubEngine::default()).unwrap()
    }

    #[test]
    fn test_appear_loads_homepage() {
        let mut browser = browser();
        assert_eq!(browser.address_text(), "hrln-interactive.com");

        assert_eq!(browser.on_appear().unwrap(), LoadOutcome::Issued);
        assert_eq!(
            browser.navigation_state().display_url(),
            "https://hrln-interactive.com"
        );
        assert_eq!(browser.engine().loads, vec!["https://hrln-interactive.com"]);
    }

    #[test]
    fn test_submit_same_address_twice() {
        let mut browser = browser();
        browser.submit("apple.com").unwrap();
        assert_eq!(browser.submit(" apple.com ").unwrap(), LoadOutcome::Unchanged);
        assert_eq!(
            browser.submit("https://apple.com").unwrap(),
            LoadOutcome::Unchanged
        );
        assert_eq!(browser.engine().loads.len(), 1);
    }

    #[test]
    fn test_search_submission() {
        let mut browser = browser();
        browser.submit("what is swift").unwrap();
        assert_eq!(
            browser.navigation_state().display_url(),
            "https://www.google.com/search?q=what%20is%20swift"
        );
    }

    #[test]
    fn test_empty_submission_is_noop() {
        let mut browser = browser();
        browser.submit("apple.com").unwrap();
        let before = browser.navigation_state().clone();

        let err = browser.submit("   ").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Navigation(NavigationError::EmptyInput)
        ));
        assert_eq!(browser.navigation_state(), &before);
        assert_eq!(browser.engine().loads.len(), 1);
    }

    #[test]
    fn test_invalid_submission_is_noop() {
        let mut browser = browser();
        let err = browser.submit("http://exa mple.com").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Navigation(NavigationError::InvalidUrl(_))
        ));
        assert!(!browser.navigation_state().is_loaded());
        assert!(browser.engine().loads.is_empty());
    }

    #[test]
    fn test_history_mirrors_address() {
        let mut browser = browser();
        browser.submit("apple.com").unwrap();
        browser.submit("swift.org").unwrap();
        assert!(browser.can_go_back());

        assert!(browser.go_back().unwrap());
        assert_eq!(browser.address_text(), "https://apple.com/");
        assert!(browser.can_go_forward());
        assert!(browser.navigation_state().can_go_forward);

        assert!(browser.go_forward().unwrap());
        assert_eq!(browser.address_text(), "https://swift.org/");
        assert!(!browser.go_forward().unwrap());
    }

    #[test]
    fn test_committed_event_updates_address() {
        let mut browser = browser();
        browser.submit("apple.com").unwrap();

        let redirected = Url::parse("https://www.apple.com/").unwrap();
        let id = browser.navigation_state().pending.unwrap();
        assert!(browser
            .handle_engine_event(EngineEvent::Committed { id, url: redirected })
            .is_none());
        assert_eq!(browser.address_text(), "https://www.apple.com/");
    }

    #[test]
    fn test_superseded_commit_leaves_address() {
        let mut browser = browser();
        browser.submit("apple.com").unwrap();
        let first = browser.navigation_state().pending.unwrap();
        browser.submit("swift.org").unwrap();
        browser.set_address_text("swi");

        browser.handle_engine_event(EngineEvent::Committed {
            id: first,
            url: Url::parse("https://www.apple.com/").unwrap(),
        });
        assert_eq!(browser.address_text(), "swi");
        assert_eq!(browser.navigation_state().display_url(), "https://swift.org");
    }

    #[test]
    fn test_failed_event_reports_error() {
        let mut browser = browser();
        browser.submit("nowhere.test").unwrap();

        let id = browser.navigation_state().pending.unwrap();
        let failure = browser.handle_engine_event(EngineEvent::Failed {
            id,
            url: Url::parse("https://nowhere.test").unwrap(),
            reason: "dns".to_string(),
        });
        assert!(matches!(
            failure,
            Some(NavigationError::NavigationFailed { .. })
        ));
        assert_eq!(browser.address_text(), "nowhere.test");
    }

    #[test]
    fn test_reload_before_load() {
        let mut browser = browser();
        assert!(!browser.reload().unwrap());
        browser.submit("apple.com").unwrap();
        assert!(browser.reload().unwrap());
    }

    #[test]
    fn test_config_drives_interpreter() {
        let config = Config {
            search_engine: "https://duckduckgo.com/?q=%s".to_string(),
            interpretation: InterpretMode::Legacy,
            ..Config::default()
        };
        let mut browser = Browser::new(config, StubEngine::default()).unwrap();
        browser.submit("Apple.COM").unwrap();
        assert_eq!(browser.navigation_state().display_url(), "https://apple.com");
        assert_eq!(browser.search_engine(), "https://duckduckgo.com/?q=%s");

        let bad = Config {
            search_engine: "https://duckduckgo.com/".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            Browser::new(bad, StubEngine::default()),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn test_set_search_engine() {
        let mut browser = browser();
        browser
            .set_search_engine("https://duckduckgo.com/?q=%s".to_string())
            .unwrap();
        assert_eq!(browser.config().search_engine, "https://duckduckgo.com/?q=%s");
        assert!(browser.set_search_engine("nope".to_string()).is_err());
        assert_eq!(browser.search_engine(), "https://duckduckgo.com/?q=%s");

        let resolution = browser.resolve_input("rust book").unwrap();
        assert_eq!(
            resolution.target().as_str(),
            "https://duckduckgo.com/?q=rust%20book"
        );
    }
}
