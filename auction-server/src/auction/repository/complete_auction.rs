use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    /// Returns whether the auction moved from active to completed with this call.
    pub async fn complete_auction(&self, auction_id: &entities::AuctionId) -> Result<bool, RestError> {
        self.db.complete_auction(auction_id).await
    }
}
