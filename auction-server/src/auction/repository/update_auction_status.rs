use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    #[tracing::instrument(skip_all, fields(auction_id, status))]
    pub async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<(), RestError> {
        tracing::Span::current().record("auction_id", auction_id.as_str());
        tracing::Span::current().record("status", format!("{:?}", status));
        if !self.db.update_auction_status(auction_id, status).await? {
            tracing::warn!("Auction not found for status update");
            return Err(RestError::AuctionNotFound);
        }
        Ok(())
    }
}
