//! Metrics Server
//!
//! This server serves metrics over /metrics in OpenMetrics format.
use {
    crate::{
        config::RunOptions,
        per_metrics::DB_QUERIES_BUCKETS,
        state::Store,
    },
    anyhow::Result,
    axum::{
        routing::get,
        Router,
    },
    axum_prometheus::metrics_exporter_prometheus::{
        Matcher,
        PrometheusBuilder,
        PrometheusHandle,
    },
    std::sync::Arc,
    tokio_util::sync::CancellationToken,
};

/// Installs the global Prometheus recorder shared by the api layer and the metrics server.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("db_queries_duration_seconds".to_string()),
            DB_QUERIES_BUCKETS,
        )?
        .install_recorder()
        .map_err(|err| anyhow::anyhow!("Failed to install metrics recorder: {:?}", err))
}

pub async fn start_metrics(
    run_options: RunOptions,
    store: Arc<Store>,
    shutdown: CancellationToken,
) -> Result<()> {
    tracing::info!(addr = %run_options.server.metrics_addr, "Starting Metrics Server...");

    let metric_handle = store.metrics_recorder.clone();
    let app = Router::new().route("/metrics", get(|| async move { metric_handle.render() }));

    let listener = tokio::net::TcpListener::bind(&run_options.server.metrics_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            tracing::info!("Shutting down metrics server...");
        })
        .await?;
    Ok(())
}
