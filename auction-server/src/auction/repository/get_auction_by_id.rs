use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    pub async fn get_auction_by_id(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<entities::Auction, RestError> {
        self.db.get_auction(auction_id).await
    }
}
