// src/config/app.rs

use crate::check::{DEFAULT_CHECK_CATEGORY, DEFAULT_CHECK_NAME};
use crate::client::ClientSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct EndpointConfig {
    pub uri: String,
    /// Advisory repeat interval passed through to the host scheduler.
    #[serde(default)]
    pub repeat_after_secs: Option<u64>,
}

impl EndpointConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            repeat_after_secs: None,
        }
    }

    pub fn repeat_after(&self) -> Option<Duration> {
        self.repeat_after_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct CheckConfig {
    #[serde(default = "default_check_name")]
    pub name: String,
    #[serde(default = "default_check_category")]
    pub category: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            name: default_check_name(),
            category: default_check_category(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default, Serialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

fn default_check_name() -> String {
    DEFAULT_CHECK_NAME.to_string()
}

fn default_check_category() -> String {
    DEFAULT_CHECK_CATEGORY.to_string()
}
