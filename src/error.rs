// src/error.rs

use thiserror::Error;

/// Errors produced while configuring probes or talking to a search endpoint.
///
/// Note that `perform_check` never returns one of these: transport errors are
/// folded into a failed `CheckResult` at the call site.
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String, line: Option<usize> },

    // HTTP and network errors
    #[error("HTTP client error: {message}")]
    HttpClient { message: String },

    #[error("Request timeout after {timeout_secs}s")]
    RequestTimeout { timeout_secs: u64 },

    #[error("HTTP client build error: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
        proxy_url: Option<String>,
    },

    #[error("Search client panicked: {message}")]
    ClientPanicked { message: String },

    #[error("No client registered for endpoint '{endpoint}'")]
    ClientNotRegistered { endpoint: String },

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error during {operation}: {message}")]
    Io { operation: String, message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn config_validation(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }
}

/// Renders an error followed by every cause in its `source()` chain.
///
/// reqwest only says "error sending request" at the top level; the reason
/// (refused, DNS, TLS) lives further down the chain.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigParse {
            message: format!("Failed to parse config file: {err}"),
            line: err.location().map(|loc| loc.line()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpClient {
            message: error_chain(&err),
        }
    }
}
