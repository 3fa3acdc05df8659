mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use qrshare_core::PublishStore;
use qrshare_gateway::{App, AppState};
use qrshare_publisher::{PublisherConfig, PublisherService};
use qrshare_storage::{FileStore, InMemoryStore, MySqlStore, RedisStore};
use qrshare_telemetry::TelemetryConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let telemetry = TelemetryConfig::builder()
        .service_name("qrshare-gateway")
        .format(config.log_format)
        .otlp_endpoint(config.otlp_endpoint.clone())
        .build();
    let _guard = qrshare_telemetry::init(telemetry)?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    let publisher_config = PublisherConfig::builder()
        .base_url(config.base_url.clone())
        .max_text_bytes(config.max_text_bytes)
        .max_metadata_bytes(config.max_metadata_bytes)
        .build();

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, InMemoryStore::new(), publisher_config).await?;
        }
        StorageBackendArg::File => {
            let data_dir = config
                .data_dir
                .context("data dir is required when storage backend is file")?;
            let store = FileStore::open(data_dir).await?;
            run_server(config.listen_addr, store, publisher_config).await?;
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .context("redis url is required when storage backend is redis")?;
            let mut store = RedisStore::connect(&redis_url).await?;
            if let Some(ttl) = config.redis_ttl_secs {
                store = store.with_ttl(Duration::from_secs(ttl));
            }
            run_server(config.listen_addr, store, publisher_config).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .context("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlStore::connect(&mysql_dsn).await?;
            store.migrate().await?;
            run_server(config.listen_addr, store, publisher_config).await?;
        }
    }

    Ok(())
}

async fn run_server<S: PublishStore>(
    listen_addr: SocketAddr,
    store: S,
    config: PublisherConfig,
) -> anyhow::Result<()> {
    let service = PublisherService::new(store, config);
    let router = App::router(AppState::new(Arc::new(service)));

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
