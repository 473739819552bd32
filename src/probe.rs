// src/probe.rs

use crate::check::{CheckMetadata, CheckResult, CustomCheck};
use crate::client::{ClientFactory, PingResponse};
use crate::error::{AppError, Result};
use crate::registry::ConnectionRegistry;
use async_trait::async_trait;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};
use url::Url;

/// Liveness check for a single search endpoint.
///
/// Construction only makes sure a client handle is registered for the
/// endpoint; nothing touches the network until `perform_check` runs.
#[derive(Debug, Clone)]
pub struct EndpointHealthProbe {
    endpoint: Url,
    identity: String,
    metadata: CheckMetadata,
    registry: Arc<ConnectionRegistry>,
}

impl EndpointHealthProbe {
    pub fn new(
        endpoint: Url,
        repeat_after: Option<Duration>,
        registry: Arc<ConnectionRegistry>,
        factory: &dyn ClientFactory,
    ) -> Result<Self> {
        let identity = endpoint.to_string();
        registry.get_or_insert_with(&identity, || factory.create(&endpoint))?;

        Ok(Self {
            endpoint,
            identity,
            metadata: CheckMetadata {
                repeat_after,
                ..CheckMetadata::default()
            },
            registry,
        })
    }

    pub fn with_metadata(mut self, name: impl Into<String>, category: impl Into<String>) -> Self {
        self.metadata.name = name.into();
        self.metadata.category = category.into();
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Registry key for this endpoint, e.g. `http://search.local:9200/`.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Pings through the registered client. A panicking client is reported
    /// as an error rather than unwinding into the caller.
    async fn ping(&self) -> Result<PingResponse> {
        let client = self
            .registry
            .get(&self.identity)
            .ok_or_else(|| AppError::ClientNotRegistered {
                endpoint: self.identity.clone(),
            })?;

        AssertUnwindSafe(client.ping())
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(AppError::ClientPanicked {
                    message: panic_message(payload.as_ref()),
                })
            })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[async_trait]
impl CustomCheck for EndpointHealthProbe {
    fn metadata(&self) -> &CheckMetadata {
        &self.metadata
    }

    fn target(&self) -> Option<&str> {
        Some(&self.identity)
    }

    async fn perform_check(&self) -> CheckResult {
        let start = Instant::now();

        match self.ping().await {
            Ok(response) if response.is_ok() => {
                info!(endpoint = %self.identity, "Ping successful");
                CheckResult::Pass
            }
            Ok(response) => {
                let status = response
                    .status_code
                    .map_or_else(|| "none".to_string(), |code| code.to_string());
                let message = format!("Ping Failed for '{}'. Error: {}", self.identity, status);
                error!(
                    endpoint = %self.identity,
                    status_code = %status,
                    completed = response.completed,
                    "{}", message
                );
                CheckResult::Failed(message)
            }
            Err(e) => {
                let elapsed = start.elapsed();
                let message = format!(
                    "Failed to contact '{}'. Duration: {:?}. Error: {}",
                    self.identity, elapsed, e
                );
                error!(
                    endpoint = %self.identity,
                    duration = ?elapsed,
                    error = %e,
                    "{}", message
                );
                CheckResult::Failed(message)
            }
        }
    }
}
