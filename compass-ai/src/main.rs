//! compass-ai - Political compass service
//!
//! Serves the people on the compass and adds new people by name, scoring
//! them through a text-generation model.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use compass_ai::config::{resolve_model_settings, resolve_questions_path, DEFAULT_PORT};
use compass_ai::db::SqlitePersonStore;
use compass_ai::services::{OllamaClient, Pipeline, QuestionBank};
use compass_ai::AppState;

/// Command-line arguments for compass-ai
#[derive(Parser, Debug)]
#[command(name = "compass-ai")]
#[command(about = "Political compass service with AI-scored people")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "COMPASS_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "COMPASS_BIND")]
    bind: std::net::IpAddr,

    /// Root folder holding the database
    #[arg(short, long, env = "COMPASS_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Weighted question table (CSV)
    #[arg(short, long, env = "COMPASS_QUESTIONS")]
    questions: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "COMPASS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = compass_common::config::load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "compass_ai={level},compass_common={level},tower_http=info",
                    level = toml_config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting compass-ai");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Resolve root folder and open database
    let root_folder = compass_common::config::resolve_root_folder(
        args.root_folder.as_deref(),
        "COMPASS_ROOT_FOLDER",
        &toml_config,
    );
    compass_common::config::ensure_root_folder(&root_folder)
        .context("Failed to initialize root folder")?;

    let db_path = compass_common::config::database_path(&root_folder);
    info!("Database: {}", db_path.display());
    let db_pool = compass_ai::db::init_database_pool(&db_path)
        .await
        .context("Failed to open database")?;

    // Step 2: Load question table (immutable for the process lifetime)
    let questions_path = resolve_questions_path(args.questions, &toml_config);
    let questions = Arc::new(
        QuestionBank::load(&questions_path).context("Failed to load question table")?,
    );
    if questions.is_empty() {
        tracing::warn!("Question table is empty; every person will land at (0, 0)");
    }

    // Step 3: Model client
    let model_settings = resolve_model_settings(&toml_config);
    info!(
        base_url = %model_settings.base_url,
        model = %model_settings.model,
        requests_per_second = model_settings.requests_per_second,
        "Model endpoint configured"
    );
    let model_client =
        Arc::new(OllamaClient::new(model_settings).context("Failed to build model client")?);

    // Step 4: Pipeline and router
    let store = Arc::new(SqlitePersonStore::new(db_pool.clone()));
    let pipeline = Arc::new(Pipeline::new(questions, model_client, store));
    let state = AppState::new(db_pool, pipeline);
    let app = compass_ai::build_router(state);

    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::new(args.bind, port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
