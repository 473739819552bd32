// src/config/mod.rs

pub mod app;
pub mod loader;
pub mod validation;

pub use app::{CheckConfig, EndpointConfig, ProbeConfig};
pub use loader::load_config;
pub use validation::ConfigValidator;
