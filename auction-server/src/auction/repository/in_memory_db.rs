use {
    super::{
        entities,
        Database,
    },
    crate::api::RestError,
    axum::async_trait,
    dashmap::{
        mapref::entry::Entry,
        DashMap,
    },
};

/// Process-local auction storage, used when no database url is configured.
///
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryDB {
    auctions: DashMap<entities::AuctionId, entities::Auction>,
}

impl InMemoryDB {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Database for InMemoryDB {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), RestError> {
        match self.auctions.entry(auction.id.clone()) {
            Entry::Occupied(_) => {
                tracing::error!(auction_id = %auction.id, "In-memory DB: Duplicate auction id");
                Err(RestError::TemporarilyUnavailable)
            }
            Entry::Vacant(entry) => {
                entry.insert(auction.clone());
                Ok(())
            }
        }
    }

    async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<entities::Auction, RestError> {
        self.auctions
            .get(auction_id)
            .map(|auction| auction.clone())
            .ok_or(RestError::AuctionNotFound)
    }

    async fn get_auctions(
        &self,
        filter: &entities::AuctionFilter,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let mut auctions: Vec<entities::Auction> = self
            .auctions
            .iter()
            .filter(|auction| filter.matches(auction.value()))
            .map(|auction| auction.value().clone())
            .collect();
        auctions.sort_by_key(|auction| auction.creation_time);
        Ok(auctions)
    }

    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<bool, RestError> {
        Ok(match self.auctions.get_mut(auction_id) {
            Some(mut auction) => {
                auction.status = status;
                true
            }
            None => false,
        })
    }

    async fn complete_auction(&self, auction_id: &entities::AuctionId) -> Result<bool, RestError> {
        Ok(match self.auctions.get_mut(auction_id) {
            Some(mut auction) if auction.is_active() => {
                auction.status = entities::AuctionStatus::Completed;
                true
            }
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::entities::tests::get_auction_create,
    };

    #[tokio::test]
    async fn test_add_auction_rejects_duplicate_id() {
        let db = InMemoryDB::new();
        let auction =
            entities::Auction::try_new(get_auction_create("Vintage Camera", "Photography")).unwrap();
        db.add_auction(&auction).await.unwrap();
        assert_eq!(
            db.add_auction(&auction).await.unwrap_err(),
            RestError::TemporarilyUnavailable
        );
    }

    #[tokio::test]
    async fn test_complete_auction_only_once() {
        let db = InMemoryDB::new();
        let auction =
            entities::Auction::try_new(get_auction_create("Vintage Camera", "Photography")).unwrap();
        db.add_auction(&auction).await.unwrap();

        assert!(db.complete_auction(&auction.id).await.unwrap());
        assert!(!db.complete_auction(&auction.id).await.unwrap());
        assert!(!db.complete_auction(&"missing".to_string()).await.unwrap());
        assert_eq!(
            db.get_auction(&auction.id).await.unwrap().status,
            entities::AuctionStatus::Completed
        );
    }
}
