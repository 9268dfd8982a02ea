use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_core::{ClinicService, CoreConfig, config::seed_data_from_env_value};

/// Clinic record service
///
/// Every flag can also be set through the environment (or a `.env` file).
#[derive(Parser, Debug)]
#[command(name = "clinic-run")]
#[command(about = "Serve the clinic patient and appointment REST API")]
struct Cli {
    /// Address the REST server binds to
    #[arg(long, env = "CLINIC_REST_ADDR", default_value = "0.0.0.0:5000")]
    addr: SocketAddr,

    /// Start with the demo patients and appointment (true/false)
    #[arg(long, env = "CLINIC_SEED_DATA")]
    seed: Option<String>,
}

/// Main entry point for the clinic application
///
/// Resolves configuration once, builds the in-memory clinic service, and serves the REST
/// API until interrupted. State is not persisted; seed data is re-applied on every start.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `CLINIC_SEED_DATA`: whether to seed demo data (default: true)
/// - `RUST_LOG`: extra tracing directives
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - `CLINIC_SEED_DATA` is not a boolean,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_run=info".parse()?)
                .add_directive("clinic_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let cfg = CoreConfig::new(seed_data_from_env_value(cli.seed)?);
    let clinic_service = ClinicService::from_config(&cfg);
    let app = api_rest::router(clinic_service);

    tracing::info!("++ Starting clinic REST API on {}", cli.addr);

    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Clinic REST API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
}
