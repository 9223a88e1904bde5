//! Navigation targets
//!
//! A target is the validated output of address bar interpretation. It keeps
//! the text it was built from so the address bar can show exactly what was
//! resolved, while equality goes through the parsed URL.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::NavigationError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NavigationTarget {
    href: String,
    url: Url,
}

impl NavigationTarget {
    /// Parse `href` into a target, keeping the text verbatim.
    pub fn parse(href: impl Into<String>) -> Result<Self> {
        let href = href.into();
        match Url::parse(&href) {
            Ok(url) if url.has_host() => Ok(Self { href, url }),
            _ => Err(NavigationError::InvalidUrl(href)),
        }
    }

    /// Wrap a URL reported by the engine.
    pub fn from_url(url: Url) -> Self {
        Self {
            href: url.to_string(),
            url,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.href
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn into_url(self) -> Url {
        self.url
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

impl PartialEq for NavigationTarget {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for NavigationTarget {}

impl PartialEq<Url> for NavigationTarget {
    fn eq(&self, other: &Url) -> bool {
        &self.url == other
    }
}

impl std::fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.href)
    }
}

impl std::str::FromStr for NavigationTarget {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NavigationTarget {
    type Error = NavigationError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<NavigationTarget> for String {
    fn from(target: NavigationTarget) -> Self {
        target.href
    }
}
