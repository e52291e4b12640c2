use {
    crate::RouteTrait,
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

pub type AuctionId = String;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    /// The auction is open and waiting for its expiry.
    Active,
    /// The auction was closed after its expiry interval elapsed.
    Completed,
}

/// Parameters needed to list a new item for auction.
#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct AuctionCreate {
    /// Name of the product being auctioned.
    #[schema(example = "iPhone 15 Pro")]
    pub product_name: String,
    /// Category of the product.
    #[schema(example = "Electronics")]
    pub category:     String,
    /// Free text description of the product.
    #[schema(example = "256GB, natural titanium, barely used")]
    pub description:  String,
    /// Condition of the product.
    #[schema(example = "used")]
    pub condition:    ProductCondition,
}

/// Status to set on an auction regardless of its current status.
#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct AuctionStatusUpdate {
    #[schema(example = "completed")]
    pub status: AuctionStatus,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct Auction {
    /// The unique id of the auction.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:            AuctionId,
    #[schema(example = "iPhone 15 Pro")]
    pub product_name:  String,
    #[schema(example = "Electronics")]
    pub category:      String,
    #[schema(example = "256GB, natural titanium, barely used")]
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    /// The time the auction was accepted by the server.
    #[schema(example = "2024-05-23T21:26:57Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Auctions {
    pub items: Vec<Auction>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct GetAuctionParams {
    #[param(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id: AuctionId,
}

/// Every filter is optional. A missing status matches auctions of any status.
#[derive(Serialize, Deserialize, IntoParams, Clone, Debug, Default)]
pub struct GetAuctionsQueryParams {
    #[param(example = "active", value_type = Option<AuctionStatus>)]
    pub status:       Option<AuctionStatus>,
    /// Case-insensitive partial match on the category.
    #[param(example = "electronics", value_type = Option<String>)]
    pub category:     Option<String>,
    /// Case-insensitive partial match on the product name.
    #[param(example = "phone", value_type = Option<String>)]
    pub product_name: Option<String>,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostAuction,
    #[strum(serialize = "")]
    GetAuctions,
    #[strum(serialize = ":auction_id")]
    GetAuction,
    #[strum(serialize = ":auction_id/status")]
    UpdateAuctionStatus,
}

impl RouteTrait for Route {
    fn method(&self) -> http::Method {
        match self {
            Route::PostAuction => http::Method::POST,
            Route::GetAuctions => http::Method::GET,
            Route::GetAuction => http::Method::GET,
            Route::UpdateAuctionStatus => http::Method::PATCH,
        }
    }

    fn full_path(&self) -> String {
        let path = format!(
            "{}{}{}",
            crate::Route::V1.as_ref(),
            crate::Route::Auction.as_ref(),
            self.as_ref()
        );
        path.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_path() {
        assert_eq!(Route::PostAuction.full_path(), "/v1/auctions");
        assert_eq!(Route::GetAuction.full_path(), "/v1/auctions/:auction_id");
        assert_eq!(
            Route::UpdateAuctionStatus.full_path(),
            "/v1/auctions/:auction_id/status"
        );
    }

    #[test]
    fn test_status_query_param_is_optional() {
        let params: GetAuctionsQueryParams =
            serde_json::from_str(r#"{"product_name": "phone"}"#).unwrap();
        assert!(params.status.is_none());
        assert_eq!(params.product_name.as_deref(), Some("phone"));

        let params: GetAuctionsQueryParams =
            serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(params.status, Some(AuctionStatus::Completed));
    }
}
