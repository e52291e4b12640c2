use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct UpdateAuctionStatusInput {
    pub auction_id: entities::AuctionId,
    pub status:     entities::AuctionStatus,
}

impl Service {
    /// Sets the status of an auction.
    ///
    /// A completed auction can not go back to active, its expiry has already run.
    pub async fn update_auction_status(
        &self,
        input: UpdateAuctionStatusInput,
    ) -> Result<(), RestError> {
        if input.status == entities::AuctionStatus::Active {
            let auction = self.repo.get_auction_by_id(&input.auction_id).await?;
            if !auction.is_active() {
                tracing::warn!(auction_id = %input.auction_id, "Refused to reopen completed auction");
                return Err(RestError::AuctionAlreadyCompleted);
            }
        }
        self.repo
            .update_auction_status(&input.auction_id, input.status)
            .await
    }
}
