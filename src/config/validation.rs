// src/config/validation.rs

use crate::config::ProbeConfig;
use crate::error::{AppError, Result};
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &ProbeConfig) -> Result<()> {
        debug!("Starting configuration validation");

        Self::validate_endpoints(config)?;
        debug!("Endpoint validation passed");

        Self::validate_client(config)?;
        debug!("Client settings validation passed");

        if config.check.name.trim().is_empty() {
            return Err(AppError::config_validation(
                "Check name cannot be empty",
                Some("check.name"),
            ));
        }

        debug!("Configuration validation completed successfully");
        Ok(())
    }

    fn validate_endpoints(config: &ProbeConfig) -> Result<()> {
        if config.endpoints.is_empty() {
            return Err(AppError::config_validation(
                "At least one endpoint must be configured",
                Some("endpoints"),
            ));
        }

        let mut identities = HashSet::new();
        for endpoint in &config.endpoints {
            let url = Self::validate_url(&endpoint.uri, "endpoints.uri")?;

            // Duplicates are legal; both probes share one client.
            if !identities.insert(url.to_string()) {
                warn!(endpoint = %url, "Endpoint configured more than once");
            }

            if endpoint.repeat_after_secs == Some(0) {
                return Err(AppError::config_validation(
                    format!("repeat_after_secs must be positive for '{}'", endpoint.uri),
                    Some("endpoints.repeat_after_secs"),
                ));
            }
        }

        Ok(())
    }

    fn validate_client(config: &ProbeConfig) -> Result<()> {
        if config.client.connect_timeout_secs == 0 {
            return Err(AppError::config_validation(
                "Connect timeout must be greater than 0",
                Some("client.connect_timeout_secs"),
            ));
        }

        if config.client.request_timeout_secs == Some(0) {
            return Err(AppError::config_validation(
                "Request timeout must be greater than 0 (omit it to disable)",
                Some("client.request_timeout_secs"),
            ));
        }

        if let Some(proxy_url) = &config.client.proxy_url {
            Self::validate_url(proxy_url, "client.proxy_url")?;
        }

        Ok(())
    }

    fn validate_url(raw: &str, field: &str) -> Result<Url> {
        let url = Url::parse(raw).map_err(|e| {
            AppError::config_validation(format!("Invalid URL '{raw}': {e}"), Some(field))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::config_validation(
                format!("Unsupported scheme '{}' in '{raw}'", url.scheme()),
                Some(field),
            ));
        }

        if url.host_str().is_none() {
            return Err(AppError::config_validation(
                format!("URL '{raw}' has no host"),
                Some(field),
            ));
        }

        Ok(url)
    }
}
