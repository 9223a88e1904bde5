//! Input interpretation for the address bar
//!
//! Resolution order:
//! 1. `http://` / `https://` URL → navigate as typed
//! 2. Bare domain (`apple.com`, `docs.rs/url`) → navigate over https
//! 3. Anything else → search

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::target::NavigationTarget;
use crate::Result;

pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s";

/// Words and marks that turn otherwise domain-looking input into a search.
const SEARCH_INDICATORS: [&str; 7] = ["what", "how", "why", "when", "where", "who", "?"];

static TRAILING_TLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[A-Za-z]{2,6}(/.*)?$").expect("valid TLD pattern"));

/// RFC 3986 unreserved characters pass through; everything else is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpretMode {
    /// Literal URL / bare domain / search classification
    #[default]
    Classified,
    /// Legacy behavior: lowercase and force `https://` onto everything.
    /// Kept reachable for comparison; never the default.
    Legacy,
}

/// Result of resolving address bar input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResolution {
    /// Navigate to a literal URL or bare domain
    Navigate(NavigationTarget),
    /// Search for `query` via the configured engine
    Search {
        query: String,
        target: NavigationTarget,
    },
}

impl InputResolution {
    pub fn target(&self) -> &NavigationTarget {
        match self {
            InputResolution::Navigate(target) => target,
            InputResolution::Search { target, .. } => target,
        }
    }

    pub fn into_target(self) -> NavigationTarget {
        match self {
            InputResolution::Navigate(target) => target,
            InputResolution::Search { target, .. } => target,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, InputResolution::Search { .. })
    }
}

#[derive(Debug, Clone)]
pub struct InputInterpreter {
    /// Search engine URL template (%s replaced with query)
    search_template: String,
    mode: InterpretMode,
}

impl InputInterpreter {
    pub fn new() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
            mode: InterpretMode::Classified,
        }
    }

    pub fn with_search_engine(template: String) -> Result<Self> {
        let mut interpreter = Self::new();
        interpreter.set_search_engine(template)?;
        Ok(interpreter)
    }

    pub fn set_search_engine(&mut self, template: String) -> Result<()> {
        if !template.contains("%s") {
            return Err(NavigationError::InvalidSearchTemplate(template));
        }
        self.search_template = template;
        Ok(())
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    pub fn set_mode(&mut self, mode: InterpretMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> InterpretMode {
        self.mode
    }

    /// Turn raw address bar text into something the engine can load.
    pub fn interpret(&self, raw: &str) -> Result<NavigationTarget> {
        self.resolve(raw).map(InputResolution::into_target)
    }

    /// Like [`interpret`](Self::interpret), but reports which branch was taken.
    pub fn resolve(&self, raw: &str) -> Result<InputResolution> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(NavigationError::EmptyInput);
        }

        let resolution = match self.mode {
            InterpretMode::Classified => self.resolve_classified(input)?,
            InterpretMode::Legacy => Self::resolve_legacy(input)?,
        };

        tracing::debug!(
            input = %input,
            target = %resolution.target(),
            search = resolution.is_search(),
            "Resolved address bar input"
        );

        Ok(resolution)
    }

    fn resolve_classified(&self, input: &str) -> Result<InputResolution> {
        if has_http_scheme(input) {
            return NavigationTarget::parse(input).map(InputResolution::Navigate);
        }

        if looks_like_domain(input) {
            return NavigationTarget::parse(format!("https://{}", input))
                .map(InputResolution::Navigate);
        }

        let target = NavigationTarget::parse(self.build_search_url(input))?;
        Ok(InputResolution::Search {
            query: input.to_string(),
            target,
        })
    }

    fn resolve_legacy(input: &str) -> Result<InputResolution> {
        let lowered = input.to_lowercase();
        let href = if has_http_scheme(&lowered) {
            lowered
        } else {
            format!("https://{}", lowered)
        };
        NavigationTarget::parse(href).map(InputResolution::Navigate)
    }

    /// Build search URL from query
    fn build_search_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, QUERY_VALUE).to_string();
        self.search_template.replace("%s", &encoded)
    }
}

impl Default for InputInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret with the default (classified, Google) interpreter.
pub fn interpret(raw: &str) -> Result<NavigationTarget> {
    InputInterpreter::new().interpret(raw)
}

fn has_http_scheme(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Heuristic check if trimmed input is a bare hostname
fn looks_like_domain(input: &str) -> bool {
    if !input.contains('.') || input.contains(' ') {
        return false;
    }

    let lowered = input.to_lowercase();
    if SEARCH_INDICATORS.iter().any(|word| lowered.contains(word)) {
        return false;
    }

    TRAILING_TLD.is_match(input)
}
