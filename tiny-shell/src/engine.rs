//! Headless navigation engine
//!
//! Stands in for the embedded web view: keeps a linear back/forward history
//! and reports progress through an event channel, the way a real web view
//! reports page-load callbacks. With a [`Prober`] attached, each navigation
//! is checked over the network instead of completing immediately.

use reqwest::redirect::Policy;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use tiny_core::{
    EngineEvent, NavigationEngine, NavigationError, NavigationId, NavigationTarget, Url,
};

type EngineResult<T> = std::result::Result<T, NavigationError>;

pub struct HeadlessEngine {
    back: Vec<Url>,
    current: Option<Url>,
    forward: Vec<Url>,
    events: UnboundedSender<EngineEvent>,
    prober: Option<Prober>,
    /// Probe for the navigation in progress; superseded by the next one
    in_flight: Option<JoinHandle<()>>,
    last_issued: NavigationId,
}

impl HeadlessEngine {
    pub fn new(events: UnboundedSender<EngineEvent>) -> Self {
        Self {
            back: Vec::new(),
            current: None,
            forward: Vec::new(),
            events,
            prober: None,
            in_flight: None,
            last_issued: NavigationId(0),
        }
    }

    /// Probe each navigation over the network. Must be used inside a tokio runtime.
    pub fn with_prober(mut self, prober: Prober) -> Self {
        self.prober = Some(prober);
        self
    }

    pub fn history_len(&self) -> usize {
        self.back.len() + self.forward.len() + usize::from(self.current.is_some())
    }

    fn emit(&self, event: EngineEvent) -> EngineResult<()> {
        self.events
            .send(event)
            .map_err(|_| NavigationError::Engine("event channel closed".to_string()))
    }

    /// Whether a network check is still running for the latest navigation
    pub fn is_checking(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn navigate_current(&mut self) -> EngineResult<NavigationId> {
        let id = self.last_issued.next();
        self.last_issued = id;

        let Some(url) = self.current.clone() else {
            return Ok(id);
        };

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        self.emit(EngineEvent::Started {
            id,
            url: url.clone(),
        })?;

        match &self.prober {
            Some(prober) => {
                self.in_flight = Some(prober.spawn(id, url, self.events.clone()));
            }
            None => {
                self.emit(EngineEvent::Committed {
                    id,
                    url: url.clone(),
                })?;
                self.emit(EngineEvent::Finished { id, url })?;
            }
        }

        Ok(id)
    }
}

impl NavigationEngine for HeadlessEngine {
    fn load(&mut self, target: &NavigationTarget) -> EngineResult<NavigationId> {
        if let Some(previous) = self.current.replace(target.url().clone()) {
            self.back.push(previous);
        }
        self.forward.clear();
        self.navigate_current()
    }

    fn reload(&mut self) -> EngineResult<NavigationId> {
        self.navigate_current()
    }

    fn go_back(&mut self) -> EngineResult<NavigationId> {
        let Some(previous) = self.back.pop() else {
            return Ok(self.last_issued);
        };
        if let Some(current) = self.current.replace(previous) {
            self.forward.push(current);
        }
        self.navigate_current()
    }

    fn go_forward(&mut self) -> EngineResult<NavigationId> {
        let Some(next) = self.forward.pop() else {
            return Ok(self.last_issued);
        };
        if let Some(current) = self.current.replace(next) {
            self.back.push(current);
        }
        self.navigate_current()
    }

    fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    fn current_url(&self) -> Option<Url> {
        self.current.clone()
    }
}

/// Network reachability check standing in for a real page fetch
#[derive(Clone)]
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    fn spawn(
        &self,
        id: NavigationId,
        url: Url,
        events: UnboundedSender<EngineEvent>,
    ) -> JoinHandle<()> {
        let client = self.client.clone();
        tokio::spawn(async move {
            for event in probe(&client, id, url).await {
                if events.send(event).is_err() {
                    break;
                }
            }
        })
    }
}

async fn probe(client: &reqwest::Client, id: NavigationId, url: Url) -> Vec<EngineEvent> {
    let response = match client.head(url.clone()).send().await {
        Ok(resp) => Ok(resp),
        Err(_) => {
            client
                .get(url.clone())
                .header(reqwest::header::RANGE, "bytes=0-0")
                .send()
                .await
        }
    };

    match response {
        Ok(resp) => {
            let final_url = resp.url().clone();
            tracing::debug!(url = %final_url, status = resp.status().as_u16(), "Probe finished");
            vec![
                EngineEvent::Committed {
                    id,
                    url: final_url.clone(),
                },
                EngineEvent::Finished { id, url: final_url },
            ]
        }
        Err(e) => {
            let message = e.to_string();
            let kind = classify_failure(e.is_timeout(), e.is_connect(), e.is_request(), &message);
            vec![EngineEvent::Failed {
                id,
                url,
                reason: format!("{}: {}", kind, message),
            }]
        }
    }
}

fn classify_failure(
    is_timeout: bool,
    is_connect: bool,
    is_request: bool,
    message: &str,
) -> &'static str {
    if is_timeout {
        return "timeout";
    }

    if is_connect {
        let lowered = message.to_lowercase();
        if lowered.contains("dns") || lowered.contains("resolve") || lowered.contains("name") {
            return "dns";
        }
        if lowered.contains("tls")
            || lowered.contains("certificate")
            || lowered.contains("handshake")
        {
            return "tls";
        }
        return "connect";
    }

    if is_request {
        "request"
    } else {
        "unknown"
    }
}
