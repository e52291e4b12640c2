use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct GetAuctionByIdInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    pub async fn get_auction_by_id(
        &self,
        input: GetAuctionByIdInput,
    ) -> Result<entities::Auction, RestError> {
        self.repo.get_auction_by_id(&input.auction_id).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::repository::MockDatabase,
        std::time::Duration,
    };

    #[tokio::test]
    async fn test_get_auction_by_id_when_missing() {
        let service = Service::new_in_memory(Duration::from_secs(60));
        let result = service
            .get_auction_by_id(GetAuctionByIdInput {
                auction_id: "nonexistent-id".to_string(),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::AuctionNotFound);
    }

    #[tokio::test]
    async fn test_get_auction_by_id_when_db_fails() {
        let mut db = MockDatabase::default();
        db.expect_get_auction()
            .times(1)
            .returning(|_| Err(RestError::TemporarilyUnavailable));
        let service = Service::new_with_mocks(db, Duration::from_secs(60));

        let result = service
            .get_auction_by_id(GetAuctionByIdInput {
                auction_id: "some-id".to_string(),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::TemporarilyUnavailable);
    }
}
