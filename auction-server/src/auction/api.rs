use {
    super::{
        entities,
        service::{
            create_auction::CreateAuctionInput,
            get_auction_by_id::GetAuctionByIdInput,
            get_auctions::GetAuctionsInput,
            update_auction_status::UpdateAuctionStatusInput,
        },
    },
    crate::{
        api::{
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    auction_api_types::{
        auction::{
            Auction,
            AuctionCreate,
            AuctionStatus,
            AuctionStatusUpdate,
            Auctions,
            GetAuctionParams,
            GetAuctionsQueryParams,
            ProductCondition,
            Route,
        },
        ErrorBodyResponse,
    },
    axum::{
        extract::{
            Path,
            Query,
            State,
        },
        Json,
        Router,
    },
    std::sync::Arc,
};

/// Create a new auction.
///
/// The auction starts active and is completed automatically once the auction interval elapsed.
#[utoipa::path(post, path = "/v1/auctions", request_body = AuctionCreate, responses(
    (status = 200, description = "Auction was created successfully", body = Auction),
    (status = 400, response = ErrorBodyResponse),
))]
pub async fn post_auction(
    State(store): State<Arc<Store>>,
    Json(auction_create): Json<AuctionCreate>,
) -> Result<Json<Auction>, RestError> {
    let auction = store
        .auction_service
        .create_auction(CreateAuctionInput {
            auction: auction_create.into(),
        })
        .await?;
    Ok(Json(auction.into()))
}

/// Query the auction with the specified id.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}",
    params(GetAuctionParams),
    responses(
    (status = 200, body = Auction),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
))]
pub async fn get_auction(
    State(store): State<Arc<Store>>,
    Path(params): Path<GetAuctionParams>,
) -> Result<Json<Auction>, RestError> {
    let auction = store
        .auction_service
        .get_auction_by_id(GetAuctionByIdInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(auction.into()))
}

/// Query auctions matching the given filters.
///
/// Omitted filters match everything. Category and product name are matched case-insensitively
/// anywhere in the stored value.
#[utoipa::path(get, path = "/v1/auctions",
    params(GetAuctionsQueryParams),
    responses(
    (status = 200, body = Auctions),
    (status = 400, response = ErrorBodyResponse),
))]
pub async fn get_auctions(
    State(store): State<Arc<Store>>,
    Query(query): Query<GetAuctionsQueryParams>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = store
        .auction_service
        .get_auctions(GetAuctionsInput {
            filter: entities::AuctionFilter::new(
                query
                    .status
                    .map(entities::AuctionStatus::from)
                    .into(),
                query.category,
                query.product_name,
            ),
        })
        .await?;
    Ok(Json(Auctions {
        items: auctions.into_iter().map(Into::into).collect(),
    }))
}

/// Set the status of the auction with the specified id.
///
/// A completed auction can not be set back to active. A pending expiry of the auction is not
/// affected.
#[utoipa::path(patch, path = "/v1/auctions/{auction_id}/status",
    params(GetAuctionParams),
    request_body = AuctionStatusUpdate,
    responses(
    (status = 200, body = Auction),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
    (status = 409, description = "Auction is already completed", body = ErrorBodyResponse),
))]
pub async fn update_auction_status(
    State(store): State<Arc<Store>>,
    Path(params): Path<GetAuctionParams>,
    Json(update): Json<AuctionStatusUpdate>,
) -> Result<Json<Auction>, RestError> {
    store
        .auction_service
        .update_auction_status(UpdateAuctionStatusInput {
            auction_id: params.auction_id.clone(),
            status:     update.status.into(),
        })
        .await?;
    let auction = store
        .auction_service
        .get_auction_by_id(GetAuctionByIdInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(auction.into()))
}

pub fn get_routes() -> Router<Arc<Store>> {
    WrappedRouter::new()
        .route(Route::PostAuction, post_auction)
        .route(Route::GetAuctions, get_auctions)
        .route(Route::GetAuction, get_auction)
        .route(Route::UpdateAuctionStatus, update_auction_status)
        .router
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionCreate> for entities::AuctionCreate {
    fn from(auction: AuctionCreate) -> Self {
        entities::AuctionCreate {
            product_name: auction.product_name,
            category:     auction.category,
            description:  auction.description,
            condition:    auction.condition.into(),
        }
    }
}

impl From<entities::Auction> for Auction {
    fn from(auction: entities::Auction) -> Self {
        Auction {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time,
        }
    }
}
