use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    // NOTE: Do not call this function directly. Instead call `create_auction` from `Service`
    // so the expiry of the auction gets armed.
    pub async fn add_auction(
        &self,
        auction: entities::Auction,
    ) -> Result<entities::Auction, RestError> {
        self.db.add_auction(&auction).await?;
        Ok(auction)
    }
}
