// src/runner.rs

use crate::check::{CheckResult, CustomCheck};
use crate::client::ClientFactory;
use crate::config::ProbeConfig;
use crate::error::Result;
use crate::probe::EndpointHealthProbe;
use crate::registry::ConnectionRegistry;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Result of one check, tagged with its registration data.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub name: String,
    pub category: String,
    pub endpoint: Option<String>,
    pub repeat_after: Option<Duration>,
    pub result: CheckResult,
}

/// Builds one probe per configured endpoint, all sharing `registry`.
pub fn build_probes(
    config: &ProbeConfig,
    registry: &Arc<ConnectionRegistry>,
    factory: &dyn ClientFactory,
) -> Result<Vec<EndpointHealthProbe>> {
    let mut probes = Vec::with_capacity(config.endpoints.len());
    for endpoint in &config.endpoints {
        let url = Url::parse(&endpoint.uri)?;
        let probe = EndpointHealthProbe::new(
            url,
            endpoint.repeat_after(),
            Arc::clone(registry),
            factory,
        )?
        .with_metadata(config.check.name.clone(), config.check.category.clone());
        probes.push(probe);
    }
    Ok(probes)
}

/// Invokes every check once, concurrently, and collects the outcomes.
pub async fn run_checks(checks: &[Arc<dyn CustomCheck>]) -> Vec<CheckReport> {
    let reports = join_all(checks.iter().map(|check| async move {
        let metadata = check.metadata();
        CheckReport {
            name: metadata.name.clone(),
            category: metadata.category.clone(),
            endpoint: check.target().map(str::to_string),
            repeat_after: metadata.repeat_after,
            result: check.perform_check().await,
        }
    }))
    .await;

    let failed = reports.iter().filter(|r| !r.result.is_pass()).count();
    if failed > 0 {
        warn!(total = reports.len(), failed, "Some checks failed");
    } else {
        info!(total = reports.len(), "All checks passed");
    }

    reports
}
