use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct CreateAuctionInput {
    pub auction: entities::AuctionCreate,
}

impl Service {
    /// Stores a new auction and arms its expiry.
    ///
    /// Returns as soon as the auction is stored, the expiry runs in the background.
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn create_auction(
        &self,
        input: CreateAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let auction = entities::Auction::try_new(input.auction)?;
        tracing::Span::current().record("auction_id", auction.id.as_str());

        let auction = self.repo.add_auction(auction).await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to add auction");
            e
        })?;
        self.schedule_expiry(auction.id.clone());
        tracing::info!(
            interval = ?self.config.auction_interval,
            "Auction created"
        );
        Ok(auction)
    }
}
