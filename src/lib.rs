pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod search;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use clap::Parser;
pub use config::Config;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = cli::Cli::parse();

    match cli.command {
        Some(cli::Commands::Serve) | None => run_daemon(config, prometheus_handle).await,
        Some(cli::Commands::Translate { query }) => cmd_translate(&query.join(" ")),
        Some(cli::Commands::Search { query }) => cmd_search(&config, &query.join(" ")).await,
        Some(cli::Commands::Init) => {
            if Config::create_default_if_missing()? {
                println!("Created config.toml");
            } else {
                println!("config.toml already exists");
            }
            Ok(())
        }
    }
}

async fn run_daemon(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "Montir v{} starting in server mode...",
        env!("CARGO_PKG_VERSION")
    );

    let host = config.server.host.clone();
    let port = config.server.port;
    let server_enabled = config.server.enabled;

    let shared = Arc::new(SharedState::build(config).await?);
    let api_state = api::create_app_state(shared, prometheus_handle).await;

    let server_handle: Option<tokio::task::JoinHandle<()>> = if server_enabled {
        let app = api::router(api_state).await;
        let addr = format!("{host}:{port}");
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        Some(tokio::spawn(async move {
            info!("API server running at http://{addr}");
            if let Err(e) = axum::serve(listener, app).await {
                error!("API server error: {}", e);
            }
        }))
    } else {
        None
    };

    info!("Server running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }

    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Server stopped");

    Ok(())
}

fn cmd_translate(query: &str) -> anyhow::Result<()> {
    let keywords = search::translate(query);

    println!("Query:    {query}");
    if keywords.is_empty() {
        println!("Keywords: (none)");
    } else {
        println!("Keywords: {}", keywords.as_slice().join(", "));
    }

    Ok(())
}

async fn cmd_search(config: &Config, query: &str) -> anyhow::Result<()> {
    let keywords = search::translate(query);
    if keywords.is_empty() {
        println!("No usable search terms in {query:?}");
        return Ok(());
    }

    let store = db::Store::new(&config.general.database_path).await?;
    let executor = search::FederatedSearch::new(store.clone(), config.search.result_limit);
    let recorder = search::AnalyticsRecorder::new(store);

    let bundle = executor.execute(&keywords).await?;

    // CLI is synchronous anyway; record inline but keep failures non-fatal.
    if let Err(e) = recorder
        .record(query, keywords.as_slice(), bundle.has_results)
        .await
    {
        error!("Failed to record search analytics: {e}");
    }

    let mut shown: Vec<&str> = keywords.iter().collect();
    shown.truncate(config.search.keyword_display_limit);
    println!("Keywords: {}", shown.join(", "));
    println!();

    if !bundle.has_results {
        println!("No matches found.");
        return Ok(());
    }

    if !bundle.problems.is_empty() {
        println!("Problems ({}):", bundle.problems.len());
        for detail in &bundle.problems {
            println!(
                "  [{}] {} ({} / {})",
                detail.problem.problem_code,
                detail.problem.problem_name,
                detail.problem.severity_level,
                detail.problem.system_category,
            );
            for symptom in &detail.symptoms {
                println!("      symptom: {}", symptom.symptom_description);
            }
            for solution in &detail.solutions {
                println!(
                    "      step {}: {}",
                    solution.solution.step_order, solution.solution.solution_step
                );
            }
        }
    }

    if !bundle.symptoms.is_empty() {
        println!("Symptoms ({}):", bundle.symptoms.len());
        for hit in &bundle.symptoms {
            println!("  {}", hit.symptom.symptom_description);
        }
    }

    if !bundle.dtc_codes.is_empty() {
        println!("DTC codes ({}):", bundle.dtc_codes.len());
        for hit in &bundle.dtc_codes {
            println!(
                "  {} - {}",
                hit.dtc.dtc_code,
                hit.dtc.dtc_description.as_deref().unwrap_or("-")
            );
        }
    }

    if !bundle.sensors.is_empty() {
        println!("Sensors ({}):", bundle.sensors.len());
        for hit in &bundle.sensors {
            println!("  {}", hit.sensor.sensor_name);
        }
    }

    if !bundle.actuators.is_empty() {
        println!("Actuators ({}):", bundle.actuators.len());
        for hit in &bundle.actuators {
            println!("  {}", hit.actuator.actuator_name);
        }
    }

    Ok(())
}
