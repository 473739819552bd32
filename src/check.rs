// src/check.rs

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_CHECK_NAME: &str = "Monitor ElasticSearch";
pub const DEFAULT_CHECK_CATEGORY: &str = "Database";

/// Outcome of a single check invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Pass,
    Failed(String),
}

impl CheckResult {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Failed(reason) => Some(reason),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Failed(reason) => write!(f, "FAILED: {reason}"),
        }
    }
}

/// Registration data the host framework needs for a check.
///
/// `repeat_after` is advisory; it is handed to the host scheduler and never
/// interpreted by the check itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMetadata {
    pub name: String,
    pub category: String,
    pub repeat_after: Option<Duration>,
}

impl CheckMetadata {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        repeat_after: Option<Duration>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            repeat_after,
        }
    }
}

impl Default for CheckMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_CHECK_NAME, DEFAULT_CHECK_CATEGORY, None)
    }
}

/// A check the host framework can invoke polymorphically.
#[async_trait]
pub trait CustomCheck: Send + Sync {
    fn metadata(&self) -> &CheckMetadata;

    /// What the check is aimed at, for reporting.
    fn target(&self) -> Option<&str> {
        None
    }

    /// Runs the check once. Implementations report every failure through
    /// `CheckResult::Failed` and must not panic. Recovering from a panicking
    /// collaborator needs `panic = "unwind"`; release builds here abort.
    async fn perform_check(&self) -> CheckResult;
}
