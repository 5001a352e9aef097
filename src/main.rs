use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use linkshelf::config::{self, AppConfig};
use linkshelf::database::Database;
use linkshelf::AppState;

#[derive(Debug, Parser)]
#[command(name = "linkshelf")]
#[command(about = "Personal bookmark manager")]
struct Args {
    /// Config file (defaults to config.yaml next to the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so LINKSHELF_* overrides can live beside the binary
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linkshelf=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let exe_dir = config::exe_dir().context("failed to locate executable directory")?;
    let config_path = args.config.unwrap_or_else(|| exe_dir.join("config.yaml"));
    let config = AppConfig::load(&config_path)?.resolve_paths(&exe_dir);

    let db = Database::open(&config.database)
        .await
        .context("failed to initialize database")?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Server starting on {}", addr);
    info!("Config file: {}", config_path.display());
    info!("Database file: {}", config.database.path.display());

    let state = AppState::new(db.clone(), &config);
    if state.secret.is_unset() {
        warn!("auth.password is empty; every write request will be rejected");
    }

    linkshelf::serve(listener, state, shutdown_signal())
        .await
        .context("server failed")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
