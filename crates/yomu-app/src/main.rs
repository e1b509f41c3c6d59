use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use yomu_io::clipboard::SystemClipboard;
use yomu_ocr::StillPage;
use yomu_service::HttpLookupService;

mod context;
mod controller;
mod coordinator;
mod events;
mod panel;
mod profile;
mod session;
mod state;
mod words;

#[cfg(test)]
mod tests;

use self::controller::{AppController, Backends};
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(version, about = "Optical word lookup for a manga reader host", long_about = None)]
struct Args {
    /// JSON profile; `yomu.json` in the working directory when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image standing in for the rendered page
    #[arg(long)]
    page: PathBuf,

    /// Recognition server, overrides the profile
    #[arg(long)]
    server: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the host protocol
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.json_logs);

    let mut config = profile::load_config(args.config.as_deref())?;
    if let Some(server) = args.server {
        config.network.server_url = server;
    }
    if !config.network.is_configured() {
        tracing::warn!("No recognition server configured, lookups are disabled");
    }

    let page = StillPage::new(args.page);
    tracing::info!("Page image {}", page.path().display());
    let backends = Backends {
        renderer: Arc::new(page),
        service: Arc::new(HttpLookupService::new(config.network.clone())),
        clipboard: Arc::new(SystemClipboard),
    };

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state).await;
    let mut tasks = controller.spawn_tasks(backends).await;

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
            }
            tracing::info!("Shutdown requested");
        }
        _ = controller.stopped() => {
            tracing::info!("Event loop stopped");
        }
    }

    controller.shutdown();
    tasks.abort_all();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
            Err(e) if e.is_panic() => tracing::error!("Task panicked: {}", e),
            _ => {}
        }
    }

    Ok(())
}
