use std::future::IntoFuture;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::Notify;
use tracing::{error, info, warn};

use docintake_core::IdGenerator;
use docintake_server::api::{AppState, router};
use docintake_server::backend_factory::{create_backends, create_documents_table};
use docintake_server::config::DocintakeConfig;

/// Document intake HTTP server.
#[derive(Parser, Debug)]
#[command(
    name = "docintake-server",
    about = "Upload URL and document intake HTTP server"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "docintake.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the DynamoDB documents table, then exit.
    CreateTable,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_exists = Path::new(&cli.config).exists();
    let mut config: DocintakeConfig = if config_exists {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        DocintakeConfig::default()
    };
    config.apply_env();

    docintake_server::telemetry::init(&config.logging);

    if !config_exists {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    if let Some(Commands::CreateTable) = cli.command {
        create_documents_table(&config).await?;
        return Ok(());
    }

    if config.upload.bucket_name.is_none() {
        warn!("no upload bucket configured, upload URL requests will fail");
    }
    if config.documents.table_name.is_none() {
        warn!("no documents table configured, intake requests will fail");
    }
    if config.documents.queue_url.is_none() {
        warn!("no queue URL configured, intake requests will fail");
    }

    let backends = create_backends(&config).await?;
    let ids: Arc<dyn IdGenerator> = Arc::from(config.documents.id_strategy.generator());
    let state =
        AppState::new(&backends, ids).with_max_body_bytes(config.server.max_body_bytes);
    let app = router(state);

    let host = cli.host.as_deref().unwrap_or(&config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "docintake-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM. In-flight requests get
    // `shutdown_timeout_seconds` to finish once the signal arrives.
    let stopping = Arc::new(Notify::new());
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown({
            let stopping = Arc::clone(&stopping);
            async move {
                shutdown_signal().await;
                stopping.notify_one();
            }
        })
        .into_future();

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    tokio::select! {
        result = serve => result?,
        () = async {
            stopping.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(
                timeout_secs = config.server.shutdown_timeout_seconds,
                "shutdown timeout exceeded, dropping in-flight requests"
            );
        }
    }

    info!("docintake-server shut down");
    Ok(())
}

/// Wait for a SIGINT (Ctrl+C) or SIGTERM signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
