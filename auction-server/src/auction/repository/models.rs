#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        kernel::db::DB,
    },
    axum::async_trait,
    sqlx::{
        FromRow,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::{
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:            entities::AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: PrimitiveDateTime,
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        let creation_time = auction.creation_time.to_offset(UtcOffset::UTC);
        Auction {
            id:            auction.id.clone(),
            product_name:  auction.product_name.clone(),
            category:      auction.category.clone(),
            description:   auction.description.clone(),
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: PrimitiveDateTime::new(creation_time.date(), creation_time.time()),
        }
    }
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        entities::Auction {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time.assume_offset(UtcOffset::UTC),
        }
    }
}

/// Escapes LIKE wildcards so user input is matched literally.
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), RestError>;
    async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<entities::Auction, RestError>;
    async fn get_auctions(
        &self,
        filter: &entities::AuctionFilter,
    ) -> Result<Vec<entities::Auction>, RestError>;
    /// Returns false when no auction matched the id.
    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<bool, RestError>;
    /// Moves an active auction to completed. Returns false when no active auction matched the id.
    async fn complete_auction(&self, auction_id: &entities::AuctionId) -> Result<bool, RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_auction"
        ),
        skip_all
    )]
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), RestError> {
        let auction: Auction = auction.into();
        sqlx::query("INSERT INTO auction (id, product_name, category, description, condition, status, creation_time) VALUES ($1, $2, $3, $4, $5, $6, $7)")
            .bind(&auction.id)
            .bind(&auction.product_name)
            .bind(&auction.category)
            .bind(&auction.description)
            .bind(auction.condition)
            .bind(auction.status)
            .bind(auction.creation_time)
            .execute(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(error = e.to_string(), auction = ?auction, "DB: Failed to insert auction");
                RestError::TemporarilyUnavailable
            })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auction"
        ),
        skip_all
    )]
    async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<entities::Auction, RestError> {
        let auction: Auction = sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_one(self)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => RestError::AuctionNotFound,
                _ => {
                    tracing::Span::current().record("result", "error");
                    tracing::error!(
                        error = e.to_string(),
                        auction_id = %auction_id,
                        "Failed to get auction from db"
                    );
                    RestError::TemporarilyUnavailable
                }
            })?;
        Ok(auction.into())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auctions",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auctions"
        ),
        skip_all
    )]
    async fn get_auctions(
        &self,
        filter: &entities::AuctionFilter,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let mut query = QueryBuilder::new("SELECT * FROM auction WHERE TRUE");
        if let entities::StatusFilter::Only(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(AuctionStatus::from(status));
        }
        if let Some(category) = &filter.category {
            query.push(" AND category ILIKE ");
            query.push_bind(like_pattern(category));
        }
        if let Some(product_name) = &filter.product_name {
            query.push(" AND product_name ILIKE ");
            query.push_bind(like_pattern(product_name));
        }
        query.push(" ORDER BY creation_time ASC");
        let auctions: Vec<Auction> = query.build_query_as().fetch_all(self).await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), filter = ?filter, "DB: Failed to fetch auctions");
            RestError::TemporarilyUnavailable
        })?;
        Ok(auctions.into_iter().map(|auction| auction.into()).collect())
    }

    #[instrument(
        target = "metrics",
        name = "db_update_auction_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_auction_status"
        ),
        skip_all
    )]
    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<bool, RestError> {
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2")
            .bind(AuctionStatus::from(status))
            .bind(auction_id)
            .execute(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(
                    error = e.to_string(),
                    auction_id = %auction_id,
                    "DB: Failed to update auction status"
                );
                RestError::TemporarilyUnavailable
            })?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(
        target = "metrics",
        name = "db_complete_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "complete_auction"
        ),
        skip_all
    )]
    async fn complete_auction(&self, auction_id: &entities::AuctionId) -> Result<bool, RestError> {
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2 AND status = $3")
            .bind(AuctionStatus::Completed)
            .bind(auction_id)
            .bind(AuctionStatus::Active)
            .execute(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(
                    error = e.to_string(),
                    auction_id = %auction_id,
                    "DB: Failed to complete auction"
                );
                RestError::TemporarilyUnavailable
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::entities::tests::get_auction_create,
    };

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("phone"), "%phone%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
    }

    #[test]
    fn test_model_conversion_keeps_fields() {
        let auction = entities::Auction::try_new(get_auction_create("iPhone 15 Pro", "Electronics"))
            .unwrap();
        let model: Auction = (&auction).into();
        assert_eq!(model.status, AuctionStatus::Active);
        assert_eq!(model.condition, ProductCondition::Used);
        assert_eq!(entities::Auction::from(model), auction);
    }

    async fn add_auction(pool: &DB, product_name: &str, category: &str) -> entities::Auction {
        let auction =
            entities::Auction::try_new(get_auction_create(product_name, category)).unwrap();
        pool.add_auction(&auction).await.unwrap();
        auction
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL, run with --ignored"]
    async fn test_pg_get_missing_auction(pool: DB) {
        assert_eq!(
            pool.get_auction(&"nonexistent-id".to_string()).await,
            Err(RestError::AuctionNotFound)
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL, run with --ignored"]
    async fn test_pg_complete_auction_only_once(pool: DB) {
        let auction = add_auction(&pool, "Vintage Camera", "Photography").await;
        assert_eq!(pool.get_auction(&auction.id).await.unwrap(), auction);

        assert!(pool.complete_auction(&auction.id).await.unwrap());
        assert!(!pool.complete_auction(&auction.id).await.unwrap());
        assert_eq!(
            pool.get_auction(&auction.id).await.unwrap().status,
            entities::AuctionStatus::Completed
        );
        assert!(!pool
            .complete_auction(&"nonexistent-id".to_string())
            .await
            .unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL, run with --ignored"]
    async fn test_pg_get_auctions_filters(pool: DB) {
        let phone = add_auction(&pool, "iPhone 15 Pro", "Electronics").await;
        let bike = add_auction(&pool, "Mountain Bike", "Sports").await;
        pool.complete_auction(&bike.id).await.unwrap();

        let filter = entities::AuctionFilter::new(
            entities::StatusFilter::Any,
            None,
            Some("PHONE".to_string()),
        );
        assert_eq!(pool.get_auctions(&filter).await.unwrap(), vec![phone]);

        let filter = entities::AuctionFilter::new(
            entities::StatusFilter::Only(entities::AuctionStatus::Completed),
            Some("sport".to_string()),
            None,
        );
        let auctions = pool.get_auctions(&filter).await.unwrap();
        assert_eq!(auctions.len(), 1);
        assert_eq!(auctions[0].id, bike.id);

        let all = pool
            .get_auctions(&entities::AuctionFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let filter = entities::AuctionFilter::new(
            entities::StatusFilter::Any,
            Some("100%".to_string()),
            None,
        );
        assert!(pool.get_auctions(&filter).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL, run with --ignored"]
    async fn test_pg_update_missing_auction_status(pool: DB) {
        assert!(!pool
            .update_auction_status(
                &"nonexistent-id".to_string(),
                entities::AuctionStatus::Completed
            )
            .await
            .unwrap());
        assert!(pool
            .get_auctions(&entities::AuctionFilter::default())
            .await
            .unwrap()
            .is_empty());
    }
}
