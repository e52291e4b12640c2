use {
    crate::{
        auction::api as auction_api,
        config::RunOptions,
        state::Store,
    },
    anyhow::Result,
    auction_api_types::{
        auction::{
            Auction,
            AuctionCreate,
            AuctionStatus,
            AuctionStatusUpdate,
            Auctions,
            ProductCondition,
        },
        ErrorBodyResponse,
        Route,
        RouteTrait,
    },
    axum::{
        handler::Handler,
        http::StatusCode,
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            on,
            MethodFilter,
        },
        Json,
        Router,
    },
    axum_prometheus::PrometheusMetricLayer,
    clap::crate_version,
    std::sync::Arc,
    tokio_util::sync::CancellationToken,
    tower_http::cors::CorsLayer,
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Auction Server API {}", crate_version!())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// The auction was not found
    AuctionNotFound,
    /// The auction is already completed
    AuctionAlreadyCompleted,
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::AuctionNotFound => (
                StatusCode::NOT_FOUND,
                "Auction with the specified id was not found".to_string(),
            ),
            RestError::AuctionAlreadyCompleted => (
                StatusCode::CONFLICT,
                "Auction with the specified id is already completed".to_string(),
            ),
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// Registers handlers by their route definition from the api types crate.
pub struct WrappedRouter {
    pub router: Router<Arc<Store>>,
}

impl WrappedRouter {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    pub fn route<H, T>(self, route: impl RouteTrait, handler: H) -> Self
    where
        H: Handler<T, Arc<Store>>,
        T: 'static,
    {
        let filter = MethodFilter::try_from(route.method())
            .expect("Route method should map to a method filter");
        Self {
            router: self.router.route(&route.full_path(), on(filter, handler)),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auction_api::post_auction,
        auction_api::get_auction,
        auction_api::get_auctions,
        auction_api::update_auction_status,
    ),
    components(
        schemas(
            Auction,
            AuctionCreate,
            AuctionStatus,
            AuctionStatusUpdate,
            Auctions,
            ProductCondition,
            ErrorBodyResponse,
        ),
        responses(
            ErrorBodyResponse,
            Auction,
            Auctions,
        ),
    ),
    tags(
        (name = "Auction Server", description = "Auction Server keeps the listed auctions and \
        closes each of them automatically once its auction interval elapsed.")
    )
)]
struct ApiDoc;

pub fn build_router(store: Arc<Store>) -> Router {
    Router::new()
        .merge(Redoc::with_url(Route::Docs.as_ref().to_string(), ApiDoc::openapi()))
        .route(Route::OpenApi.as_ref(), get(|| async { Json(ApiDoc::openapi()) }))
        .merge(auction_api::get_routes())
        .route(Route::Root.as_ref(), get(root))
        .route(Route::Liveness.as_ref(), get(live))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

pub async fn start_api(
    run_options: RunOptions,
    store: Arc<Store>,
    metric_layer: PrometheusMetricLayer<'static>,
    shutdown: CancellationToken,
) -> Result<()> {
    let app = build_router(store).layer(metric_layer);

    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    tracing::info!(addr = %run_options.server.listen_addr, "Starting API server...");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            tracing::info!("Shutting down API server...");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_status_codes() {
        assert_eq!(
            RestError::AuctionNotFound.to_status_and_message().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::AuctionAlreadyCompleted.to_status_and_message().0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            RestError::BadParameters("x".to_string())
                .to_status_and_message()
                .0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::TemporarilyUnavailable.to_status_and_message().0,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
