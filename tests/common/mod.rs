//! Common test utilities and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use search_health_probe::{
    AppError, ClientFactory, ConnectionRegistry, EndpointHealthProbe, PingResponse, Result,
    SearchClient,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

pub const SEARCH_URI: &str = "http://search.local:9200";

/// One scripted reply from a stub client.
#[derive(Debug, Clone)]
pub enum Outcome {
    Status(u16),
    Error(String),
    Panic(String),
}

/// Client that replays a fixed script, cycling when it runs out.
pub struct StubClient {
    script: Vec<Outcome>,
    calls: AtomicUsize,
}

impl StubClient {
    pub fn new(script: Vec<Outcome>) -> Self {
        assert!(!script.is_empty(), "stub script cannot be empty");
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn status(code: u16) -> Self {
        Self::new(vec![Outcome::Status(code)])
    }

    pub fn error(message: &str) -> Self {
        Self::new(vec![Outcome::Error(message.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchClient for StubClient {
    async fn ping(&self) -> Result<PingResponse> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        match &self.script[n % self.script.len()] {
            Outcome::Status(code) => Ok(PingResponse::with_status(*code)),
            Outcome::Error(message) => Err(AppError::HttpClient {
                message: message.clone(),
            }),
            Outcome::Panic(message) => panic!("{}", message),
        }
    }
}

/// Hands out a pre-built client and counts how often it was asked to.
pub struct StubFactory {
    client: Arc<StubClient>,
    created: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubFactory {
    pub fn new(client: StubClient) -> Self {
        Self {
            client: Arc::new(client),
            created: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn client(&self) -> &Arc<StubClient> {
        &self.client
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl ClientFactory for StubFactory {
    fn create(&self, endpoint: &Url) -> Result<Arc<dyn SearchClient>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(endpoint.to_string());
        Ok(self.client.clone())
    }
}

pub fn search_url() -> Url {
    Url::parse(SEARCH_URI).expect("valid test uri")
}

/// Probe for `SEARCH_URI` wired to a fresh registry and the given stub.
pub fn probe_with(client: StubClient) -> (EndpointHealthProbe, Arc<ConnectionRegistry>) {
    let registry = Arc::new(ConnectionRegistry::new());
    let factory = StubFactory::new(client);
    let probe = EndpointHealthProbe::new(search_url(), None, registry.clone(), &factory)
        .expect("stub factory never fails");
    (probe, registry)
}
