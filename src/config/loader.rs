// src/config/loader.rs

use crate::config::{ConfigValidator, EndpointConfig, ProbeConfig};
use crate::error::{AppError, Result};
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

pub const ENV_ENDPOINTS: &str = "SEARCH_PROBE_ENDPOINTS";
pub const ENV_REQUEST_TIMEOUT: &str = "SEARCH_PROBE_REQUEST_TIMEOUT";
pub const ENV_CONNECT_TIMEOUT: &str = "SEARCH_PROBE_CONNECT_TIMEOUT";
pub const ENV_PROXY_URL: &str = "SEARCH_PROBE_PROXY_URL";

/// Load configuration from file (if present), apply environment overrides, validate.
pub fn load_config(config_path: &Path) -> Result<ProbeConfig> {
    let mut config = if config_path.exists() {
        info!("Loading configuration from file: {}", config_path.display());
        load_from_file(config_path)?
    } else {
        info!(
            "Configuration file '{}' not found, using defaults",
            config_path.display()
        );
        ProbeConfig::default()
    };

    override_with_env(&mut config);

    ConfigValidator::validate(&config)?;

    debug!(
        endpoints = config.endpoints.len(),
        "Configuration loaded and validated successfully"
    );
    Ok(config)
}

fn load_from_file(config_path: &Path) -> Result<ProbeConfig> {
    let content = std::fs::read_to_string(config_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::ConfigNotFound {
            path: config_path.display().to_string(),
        },
        _ => AppError::Io {
            operation: format!("read config '{}'", config_path.display()),
            message: e.to_string(),
        },
    })?;

    if content.trim().is_empty() {
        warn!("Config file '{}' is empty. Using defaults.", config_path.display());
        return Ok(ProbeConfig::default());
    }

    Ok(serde_yaml::from_str(&content)?)
}

fn override_with_env(config: &mut ProbeConfig) {
    if let Ok(endpoints) = std::env::var(ENV_ENDPOINTS) {
        let parsed: Vec<EndpointConfig> = endpoints
            .split(',')
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .map(EndpointConfig::new)
            .collect();
        if parsed.is_empty() {
            warn!("{} is set but contains no endpoints. Ignoring it.", ENV_ENDPOINTS);
        } else {
            info!(count = parsed.len(), "Overriding endpoints from environment variable");
            config.endpoints = parsed;
        }
    }

    if let Ok(timeout_str) = std::env::var(ENV_REQUEST_TIMEOUT) {
        match timeout_str.trim().parse::<u64>() {
            Ok(0) => {
                info!("Request timeout disabled from environment variable");
                config.client.request_timeout_secs = None;
            }
            Ok(secs) => {
                info!("Overriding request timeout from environment variable: {}s", secs);
                config.client.request_timeout_secs = Some(secs);
            }
            Err(_) => warn!("Invalid {} environment variable: {}", ENV_REQUEST_TIMEOUT, timeout_str),
        }
    }

    if let Ok(timeout_str) = std::env::var(ENV_CONNECT_TIMEOUT) {
        if let Ok(secs) = timeout_str.trim().parse::<u64>() {
            info!("Overriding connect timeout from environment variable: {}s", secs);
            config.client.connect_timeout_secs = secs;
        } else {
            warn!("Invalid {} environment variable: {}", ENV_CONNECT_TIMEOUT, timeout_str);
        }
    }

    if let Ok(proxy_url) = std::env::var(ENV_PROXY_URL) {
        let proxy_url = proxy_url.trim();
        config.client.proxy_url = if proxy_url.is_empty() {
            None
        } else {
            info!("Overriding proxy URL from environment variable");
            Some(proxy_url.to_string())
        };
    }
}
