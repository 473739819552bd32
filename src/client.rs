// src/client.rs

use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Proxy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Response to a liveness request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingResponse {
    /// HTTP status reported by the endpoint, if the call got that far.
    pub status_code: Option<u16>,
    pub completed: bool,
}

impl PingResponse {
    pub fn with_status(status_code: u16) -> Self {
        Self {
            status_code: Some(status_code),
            completed: true,
        }
    }

    /// Only an exact 200 counts as healthy.
    pub fn is_ok(&self) -> bool {
        self.status_code == Some(200)
    }
}

/// Client handle for one search endpoint. Shared across concurrent callers.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn ping(&self) -> Result<PingResponse>;
}

/// Builds the client handle for an endpoint the first time it is registered.
pub trait ClientFactory: Send + Sync {
    fn create(&self, endpoint: &Url) -> Result<Arc<dyn SearchClient>>;
}

#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct ClientSettings {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whole-request bound for a ping; `None` leaves requests unbounded.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            proxy_url: None,
        }
    }
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> Option<u64> {
    Some(10)
}

/// reqwest-backed client. A ping is `HEAD /` on the endpoint root.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    endpoint: Url,
    request_timeout_secs: Option<u64>,
}

impl HttpSearchClient {
    pub fn new(endpoint: Url, settings: &ClientSettings) -> Result<Self> {
        let mut builder: ClientBuilder = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)));

        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(proxy_url) = settings.proxy_url.as_deref().filter(|p| !p.trim().is_empty()) {
            let proxy = Proxy::all(proxy_url).map_err(|e| AppError::HttpClientBuild {
                source: e,
                proxy_url: Some(proxy_url.to_string()),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| AppError::HttpClientBuild {
            source: e,
            proxy_url: settings.proxy_url.clone(),
        })?;

        debug!(endpoint = %endpoint, "HTTP search client created");
        Ok(Self {
            client,
            endpoint,
            request_timeout_secs: settings.request_timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> AppError {
        match elapsed_request_timeout(err.is_timeout(), err.is_connect(), self.request_timeout_secs) {
            Some(timeout_secs) => AppError::RequestTimeout { timeout_secs },
            None => AppError::from(err),
        }
    }
}

/// The request timeout that fired, if any.
///
/// reqwest also flags a connect timeout as `is_timeout()`; those keep their
/// own cause text instead of being reported as the request timeout.
fn elapsed_request_timeout(
    is_timeout: bool,
    is_connect: bool,
    request_timeout_secs: Option<u64>,
) -> Option<u64> {
    if is_timeout && !is_connect {
        request_timeout_secs
    } else {
        None
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn ping(&self) -> Result<PingResponse> {
        let response = self
            .client
            .head(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Ok(PingResponse::with_status(response.status().as_u16()))
    }
}

/// Produces `HttpSearchClient`s sharing one set of settings.
#[derive(Debug, Clone, Default)]
pub struct HttpClientFactory {
    settings: ClientSettings,
}

impl HttpClientFactory {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

impl ClientFactory for HttpClientFactory {
    fn create(&self, endpoint: &Url) -> Result<Arc<dyn SearchClient>> {
        let client = HttpSearchClient::new(endpoint.clone(), &self.settings)?;
        info!(
            endpoint = %endpoint,
            connect_timeout_secs = self.settings.connect_timeout_secs,
            request_timeout_secs = ?self.settings.request_timeout_secs,
            "Created search client for endpoint"
        );
        Ok(Arc::new(client))
    }
}
