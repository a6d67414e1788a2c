// src/checker/scripted.rs
// In-memory Transport for tests: canned replies per URL, optional delays,
// and counters for calls and peak concurrency.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

use super::transport::{CheckMethod, HopResponse, Transport};
use crate::error::TransportError;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Respond(HopResponse),
    Fail(TransportError),
    Panic,
}

impl Reply {
    pub(crate) fn status(status: u16) -> Self {
        Reply::Respond(HopResponse::new(status))
    }

    pub(crate) fn redirect(status: u16, location: &str) -> Self {
        Reply::Respond(HopResponse::redirect(status, location))
    }

    pub(crate) fn refused() -> Self {
        Reply::Fail(TransportError::Connect("connection refused".to_string()))
    }
}

#[derive(Debug, Clone)]
struct Route {
    head: Reply,
    get: Reply,
    delay: Duration,
}

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: HashMap<String, Route>,
    calls: Mutex<Vec<(CheckMethod, String)>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

// Keeps in_flight honest even when a task is aborted mid-delay
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn key(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Same reply for HEAD and GET.
    pub(crate) fn route(self, url: &str, reply: Reply) -> Self {
        self.route_by_method(url, reply.clone(), reply)
    }

    pub(crate) fn route_by_method(mut self, url: &str, head: Reply, get: Reply) -> Self {
        self.routes.insert(
            key(url),
            Route {
                head,
                get,
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub(crate) fn delayed(mut self, url: &str, reply: Reply, delay: Duration) -> Self {
        self.routes.insert(
            key(url),
            Route {
                head: reply.clone(),
                get: reply,
                delay,
            },
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<(CheckMethod, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, method: CheckMethod, url: &Url) -> Result<HopResponse, TransportError> {
        self.calls.lock().unwrap().push((method, url.to_string()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.peak.fetch_max(current, Ordering::SeqCst);

        let Some(route) = self.routes.get(url.as_str()).cloned() else {
            return Err(TransportError::Connect(format!("no route to {}", url)));
        };

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        let reply = match method {
            CheckMethod::Head => route.head,
            CheckMethod::Get => route.get,
        };
        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(error) => Err(error),
            Reply::Panic => panic!("scripted transport blew up on {}", url),
        }
    }
}
