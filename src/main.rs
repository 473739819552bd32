// src/main.rs

use search_health_probe::{
    cli::{Cli, Commands},
    config::{self, ProbeConfig},
    runner::{build_probes, run_checks},
    AppError, ConnectionRegistry, CustomCheck, HttpClientFactory,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(cli: &Cli) {
    let env_filter =
        EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so stdout carries only the check results.
    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_current_span(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn load(cli: &Cli) -> Result<ProbeConfig, AppError> {
    let config_path = cli.config_path();
    config::load_config(&config_path).map_err(|e| {
        error!(config.path = %config_path.display(), error = %e, "Failed to load or validate configuration");
        e
    })
}

async fn check(config: ProbeConfig) -> Result<bool, AppError> {
    let registry = Arc::new(ConnectionRegistry::new());
    let factory = HttpClientFactory::new(config.client.clone());
    let probes = build_probes(&config, &registry, &factory)?;
    info!(
        probes = probes.len(),
        clients = registry.len(),
        "Probes constructed"
    );

    let checks: Vec<Arc<dyn CustomCheck>> = probes
        .into_iter()
        .map(|probe| Arc::new(probe) as Arc<dyn CustomCheck>)
        .collect();

    let reports = run_checks(&checks).await;
    for report in &reports {
        println!(
            "[{}] {} {}: {}",
            report.category,
            report.name,
            report.endpoint.as_deref().unwrap_or("-"),
            report.result
        );
    }

    Ok(reports.iter().all(|r| r.result.is_pass()))
}

fn show_config(config: &ProbeConfig) {
    println!("Configuration is valid.");
    println!("Check: {} [{}]", config.check.name, config.check.category);
    println!(
        "Request timeout: {}",
        config
            .client
            .request_timeout_secs
            .map_or_else(|| "disabled".to_string(), |secs| format!("{secs}s"))
    );
    for endpoint in &config.endpoints {
        match endpoint.repeat_after_secs {
            Some(secs) => println!("  {} (repeat after {}s)", endpoint.uri, secs),
            None => println!("  {}", endpoint.uri),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, AppError> {
    let cli = Cli::parse_args();
    init_tracing(&cli);

    let config = load(&cli)?;

    match cli.command() {
        Commands::Config => {
            show_config(&config);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => {
            if check(config).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
