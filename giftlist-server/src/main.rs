//! Main entry point for the giftlist server.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use giftlist::{GiftStore, ImageStore, MemoryGiftStore, SqliteGiftStore};
use giftlist_server::{router, AppState, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = giftlist::init_logger(cli.verbose, cli.quiet);
    log::debug!("log level {level}");

    let config = cli
        .config_builder()
        .build()
        .context("invalid configuration")?;

    let store: Arc<dyn GiftStore> = if cli.in_memory {
        log::warn!("using an in-memory store; gifts are lost on exit");
        Arc::new(MemoryGiftStore::new())
    } else {
        let db_config = config.database_config();
        let store = SqliteGiftStore::open(db_config).with_context(|| {
            format!("cannot open database {}", config.database_path.display())
        })?;
        Arc::new(store)
    };

    let images = ImageStore::new(&config.images_dir);
    images.ensure_dir().with_context(|| {
        format!("cannot create images directory {}", config.images_dir.display())
    })?;

    let state = AppState::new(store, config.admin_secret.clone(), images);
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot listen on {addr}"))?;
    log::info!("server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("shutdown requested"),
        Err(e) => {
            log::error!("cannot listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}
