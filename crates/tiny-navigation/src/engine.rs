//! Embedded engine capability
//!
//! The rendering/network engine is a black box. The facade only needs to
//! issue these commands and receive [`EngineEvent`]s back on the UI thread.
//! Every command that starts a navigation hands back a [`NavigationId`], and
//! every event carries the id of the navigation it belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::target::NavigationTarget;
use crate::Result;

/// Identifies one navigation issued to an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationId(pub u64);

impl NavigationId {
    /// The id after this one
    pub fn next(self) -> Self {
        NavigationId(self.0.wrapping_add(1))
    }
}

impl fmt::Display for NavigationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait NavigationEngine {
    fn load(&mut self, target: &NavigationTarget) -> Result<NavigationId>;
    fn reload(&mut self) -> Result<NavigationId>;
    fn go_back(&mut self) -> Result<NavigationId>;
    fn go_forward(&mut self) -> Result<NavigationId>;
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn current_url(&self) -> Option<Url>;
}

impl<E: NavigationEngine + ?Sized> NavigationEngine for Box<E> {
    fn load(&mut self, target: &NavigationTarget) -> Result<NavigationId> {
        (**self).load(target)
    }

    fn reload(&mut self) -> Result<NavigationId> {
        (**self).reload()
    }

    fn go_back(&mut self) -> Result<NavigationId> {
        (**self).go_back()
    }

    fn go_forward(&mut self) -> Result<NavigationId> {
        (**self).go_forward()
    }

    fn can_go_back(&self) -> bool {
        (**self).can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        (**self).can_go_forward()
    }

    fn current_url(&self) -> Option<Url> {
        (**self).current_url()
    }
}

/// Navigation callbacks delivered by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A navigation began
    Started { id: NavigationId, url: Url },
    /// The engine committed to a URL (after redirects or history traversal)
    Committed { id: NavigationId, url: Url },
    /// The page finished loading
    Finished { id: NavigationId, url: Url },
    /// The navigation failed; the engine shows its own error page
    Failed {
        id: NavigationId,
        url: Url,
        reason: String,
    },
}

impl EngineEvent {
    pub fn id(&self) -> NavigationId {
        match self {
            EngineEvent::Started { id, .. }
            | EngineEvent::Committed { id, .. }
            | EngineEvent::Finished { id, .. }
            | EngineEvent::Failed { id, .. } => *id,
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            EngineEvent::Started { url, .. }
            | EngineEvent::Committed { url, .. }
            | EngineEvent::Finished { url, .. }
            | EngineEvent::Failed { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_id() {
        let event = EngineEvent::Committed {
            id: NavigationId(3),
            url: Url::parse("https://apple.com").unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "committed");
        assert_eq!(json["value"]["id"], 3);
        assert_eq!(json["value"]["url"], "https://apple.com/");

        let back: EngineEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back.id(), NavigationId(3));
    }

    #[test]
    fn test_ids_advance() {
        let first = NavigationId(1);
        assert_eq!(first.next(), NavigationId(2));
        assert_eq!(first.to_string(), "#1");
    }
}
