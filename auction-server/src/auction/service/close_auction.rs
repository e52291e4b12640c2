use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct CloseAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Moves an active auction to completed.
    ///
    /// Closing a missing or an already completed auction is reported as an error.
    pub async fn close_auction(&self, input: CloseAuctionInput) -> Result<(), RestError> {
        if self.repo.complete_auction(&input.auction_id).await? {
            return Ok(());
        }

        let auction = self.repo.get_auction_by_id(&input.auction_id).await?;
        match auction.status {
            entities::AuctionStatus::Completed => Err(RestError::AuctionAlreadyCompleted),
            entities::AuctionStatus::Active => {
                tracing::error!(
                    auction_id = %input.auction_id,
                    "Active auction could not be completed"
                );
                Err(RestError::TemporarilyUnavailable)
            }
        }
    }
}
