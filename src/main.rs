use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use item_store::config::Args;
use item_store::http::{router, AppState};
use item_store::logging::init_logging;
use item_store::{ItemStore, MemoryStore};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let config = args.store_config();
    match config.path() {
        Some(path) => info!(
            path = %path.display(),
            autosave = config.auto_save,
            "using persistent database"
        ),
        None => info!("using in-memory database (data will be lost when server stops)"),
    }
    let store = Arc::new(
        MemoryStore::from_config(&config).context("failed to initialize persistent database")?,
    );

    let app = router(AppState::new(store.clone()));
    let addr = args.bind_addr().context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shutting down server");

    if let Some(path) = store.persist_path() {
        info!("saving database before exit");
        match store.save_snapshot(path) {
            Ok(()) => info!(path = %path.display(), "database saved"),
            Err(e) => error!(error = %e, "failed to save database"),
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
