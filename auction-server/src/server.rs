use {
    crate::{
        api,
        auction::{
            repository::InMemoryDB,
            service::{
                self as auction_service,
                Service,
            },
        },
        config::RunOptions,
        kernel,
        metrics_api::{
            setup_metrics_recorder,
            start_metrics,
        },
        state::Store,
    },
    anyhow::anyhow,
    axum_prometheus::PrometheusMetricLayerBuilder,
    std::sync::Arc,
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

async fn build_auction_service(
    run_options: &RunOptions,
    shutdown: CancellationToken,
) -> anyhow::Result<Service> {
    let config = auction_service::Config {
        auction_interval: run_options.auction.auction_interval(),
        close_policy:     run_options.auction.close_policy(),
    };
    tracing::info!(
        auction_interval = ?config.auction_interval,
        close_policy = ?config.close_policy,
        "Auction service configured"
    );

    let service = match &run_options.server.database_url {
        Some(database_url) => {
            let db = kernel::db::connect(database_url).await?;
            tracing::info!("Using postgres for auction storage");
            Service::new(db, config, TaskTracker::new(), shutdown)
        }
        None => {
            tracing::warn!("No database url provided, auctions are kept in memory");
            Service::new(InMemoryDB::new(), config, TaskTracker::new(), shutdown)
        }
    };
    Ok(service)
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            tracing::info!("Registered shutdown signal handler...");
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = ?err, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shut down signal received, waiting for tasks...");
            shutdown.cancel();
        }
    });

    let metrics_recorder = setup_metrics_recorder()?;
    let (metric_layer, _) = PrometheusMetricLayerBuilder::new()
        .with_metrics_from_fn({
            let metrics_recorder = metrics_recorder.clone();
            move || metrics_recorder
        })
        .build_pair();

    let store = Arc::new(Store {
        auction_service: build_auction_service(&run_options, shutdown.clone()).await?,
        metrics_recorder,
    });

    // Either server exiting brings the whole process down.
    let (api_result, metrics_result) = tokio::join!(
        async {
            let result = api::start_api(
                run_options.clone(),
                store.clone(),
                metric_layer,
                shutdown.clone(),
            )
            .await;
            shutdown.cancel();
            result
        },
        async {
            let result = start_metrics(run_options.clone(), store.clone(), shutdown.clone()).await;
            shutdown.cancel();
            result
        },
    );
    store.auction_service.shutdown().await;

    api_result.map_err(|err| anyhow!("API server failed: {:?}", err))?;
    metrics_result.map_err(|err| anyhow!("Metrics server failed: {:?}", err))?;
    Ok(())
}
