// src/lib.rs

pub mod check;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod probe;
pub mod registry;
pub mod runner;

pub use check::{CheckMetadata, CheckResult, CustomCheck};
pub use client::{ClientFactory, ClientSettings, HttpClientFactory, PingResponse, SearchClient};
pub use config::ProbeConfig;
pub use error::{AppError, Result};
pub use probe::EndpointHealthProbe;
pub use registry::ConnectionRegistry;
