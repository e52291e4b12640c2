use {
    super::{
        close_auction::CloseAuctionInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        per_metrics::AUCTION_EXPIRY_TOTAL,
    },
    axum_prometheus::metrics,
    tokio_util::sync::CancellationToken,
};

/// Terminal state of a single expiry task.
#[derive(Clone, Debug, PartialEq)]
pub enum ExpiryOutcome {
    /// The timer fired and the auction was completed.
    Closed { attempts: u32 },
    /// The timer fired but every close attempt failed. The auction is left as it was.
    CloseFailed { attempts: u32, error: RestError },
    /// Shutdown was requested before the timer fired.
    Aborted,
}

impl ExpiryOutcome {
    fn as_label(&self) -> &'static str {
        match self {
            ExpiryOutcome::Closed { .. } => "closed",
            ExpiryOutcome::CloseFailed { .. } => "close_failed",
            ExpiryOutcome::Aborted => "aborted",
        }
    }
}

impl Service {
    /// Arms a single-shot timer which closes the auction once the auction interval elapsed.
    ///
    /// The task is tracked by the service task tracker and registered under the auction id
    /// until it reaches a terminal state.
    pub fn schedule_expiry(&self, auction_id: entities::AuctionId) {
        let token = self.shutdown.child_token();
        self.repo
            .add_in_memory_expiry(auction_id.clone(), token.clone());
        self.task_tracker.spawn({
            let service = self.clone();
            async move {
                service.run_expiry(auction_id, token).await;
            }
        });
    }

    #[tracing::instrument(skip_all, fields(auction_id = %auction_id))]
    pub async fn run_expiry(
        &self,
        auction_id: entities::AuctionId,
        token: CancellationToken,
    ) -> ExpiryOutcome {
        let outcome = tokio::select! {
            _ = tokio::time::sleep(self.config.auction_interval) => {
                self.close_expired_auction(&auction_id, &token).await
            }
            _ = token.cancelled() => ExpiryOutcome::Aborted,
        };

        match &outcome {
            ExpiryOutcome::Closed { attempts } => {
                tracing::info!(attempts, "Auction expired and was completed");
            }
            ExpiryOutcome::CloseFailed { attempts, error } => {
                tracing::error!(attempts, error = ?error, "Failed to complete expired auction");
            }
            ExpiryOutcome::Aborted => {
                tracing::info!("Shutdown requested while waiting for auction expiry");
            }
        }
        metrics::counter!(AUCTION_EXPIRY_TOTAL, &[("result", outcome.as_label())]).increment(1);
        self.repo.remove_in_memory_expiry(&auction_id);
        outcome
    }

    async fn close_expired_auction(
        &self,
        auction_id: &entities::AuctionId,
        token: &CancellationToken,
    ) -> ExpiryOutcome {
        let policy = &self.config.close_policy;
        let mut attempts = 0;
        loop {
            attempts += 1;
            let error = match self
                .close_auction(CloseAuctionInput {
                    auction_id: auction_id.clone(),
                })
                .await
            {
                Ok(()) => return ExpiryOutcome::Closed { attempts },
                Err(error) => error,
            };

            if error != RestError::TemporarilyUnavailable || attempts > policy.retry_budget {
                return ExpiryOutcome::CloseFailed { attempts, error };
            }
            tracing::warn!(attempts, error = ?error, "Failed to complete expired auction, retrying");
            tokio::select! {
                _ = tokio::time::sleep(policy.retry_delay) => {}
                _ = token.cancelled() => return ExpiryOutcome::CloseFailed { attempts, error },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            entities::{
                tests::get_auction_create,
                AuctionStatus,
            },
            repository::MockDatabase,
            service::{
                create_auction::CreateAuctionInput,
                get_auction_by_id::GetAuctionByIdInput,
                ClosePolicy,
                Config,
            },
        },
        std::time::Duration,
        tokio_util::task::TaskTracker,
    };

    async fn create_auction(service: &Service) -> entities::Auction {
        service
            .create_auction(CreateAuctionInput {
                auction: get_auction_create("iPhone 15 Pro", "Electronics"),
            })
            .await
            .unwrap()
    }

    async fn get_status(service: &Service, auction_id: &entities::AuctionId) -> AuctionStatus {
        service
            .get_auction_by_id(GetAuctionByIdInput {
                auction_id: auction_id.clone(),
            })
            .await
            .unwrap()
            .status
    }

    fn new_service_with_policy(db: MockDatabase, retry_budget: u32) -> Service {
        Service::new(
            db,
            Config {
                auction_interval: Duration::from_millis(20),
                close_policy:     ClosePolicy {
                    retry_budget,
                    retry_delay: Duration::from_millis(10),
                },
            },
            TaskTracker::new(),
            CancellationToken::new(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_auction_is_completed_after_interval() {
        let service = Service::new_in_memory(Duration::from_millis(20));
        let auction = create_auction(&service).await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(get_status(&service, &auction.id).await, AuctionStatus::Completed);
        assert_eq!(service.get_pending_expiries_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auction_is_active_before_interval() {
        let service = Service::new_in_memory(Duration::from_millis(20));
        let auction = create_auction(&service).await;

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(get_status(&service, &auction.id).await, AuctionStatus::Active);
        assert_eq!(service.get_pending_expiries_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auction_stays_active_after_shutdown() {
        let service = Service::new_in_memory(Duration::from_millis(20));
        let auction = create_auction(&service).await;

        tokio::time::sleep(Duration::from_millis(5)).await;
        service.shutdown_token().cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(get_status(&service, &auction.id).await, AuctionStatus::Active);
        assert_eq!(service.get_pending_expiries_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiries_are_independent() {
        let service = Service::new_in_memory(Duration::from_millis(20));
        let first = create_auction(&service).await;
        tokio::time::sleep(Duration::from_millis(15)).await;
        let second = create_auction(&service).await;

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(get_status(&service, &first.id).await, AuctionStatus::Completed);
        assert_eq!(get_status(&service, &second.id).await, AuctionStatus::Active);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(get_status(&service, &second.id).await, AuctionStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_expiry_single_attempt_by_default() {
        let mut db = MockDatabase::default();
        db.expect_complete_auction()
            .times(1)
            .returning(|_| Err(RestError::TemporarilyUnavailable));
        let service = new_service_with_policy(db, 0);

        let outcome = service
            .run_expiry("auction-id".to_string(), CancellationToken::new())
            .await;
        assert_eq!(
            outcome,
            ExpiryOutcome::CloseFailed {
                attempts: 1,
                error:    RestError::TemporarilyUnavailable,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_expiry_uses_retry_budget() {
        let mut db = MockDatabase::default();
        db.expect_complete_auction()
            .times(3)
            .returning(|_| Err(RestError::TemporarilyUnavailable));
        let service = new_service_with_policy(db, 2);

        let outcome = service
            .run_expiry("auction-id".to_string(), CancellationToken::new())
            .await;
        assert_eq!(
            outcome,
            ExpiryOutcome::CloseFailed {
                attempts: 3,
                error:    RestError::TemporarilyUnavailable,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_expiry_succeeds_after_retry() {
        let mut db = MockDatabase::default();
        let mut seq = mockall::Sequence::new();
        db.expect_complete_auction()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(RestError::TemporarilyUnavailable));
        db.expect_complete_auction()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        let service = new_service_with_policy(db, 2);

        let outcome = service
            .run_expiry("auction-id".to_string(), CancellationToken::new())
            .await;
        assert_eq!(outcome, ExpiryOutcome::Closed { attempts: 2 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_expiry_does_not_retry_missing_auction() {
        let mut db = MockDatabase::default();
        db.expect_complete_auction().times(1).returning(|_| Ok(false));
        db.expect_get_auction()
            .times(1)
            .returning(|_| Err(RestError::AuctionNotFound));
        let service = new_service_with_policy(db, 2);

        let outcome = service
            .run_expiry("auction-id".to_string(), CancellationToken::new())
            .await;
        assert_eq!(
            outcome,
            ExpiryOutcome::CloseFailed {
                attempts: 1,
                error:    RestError::AuctionNotFound,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_expiry_aborted_without_close() {
        let mut db = MockDatabase::default();
        db.expect_complete_auction().never();
        let service = new_service_with_policy(db, 0);

        let token = CancellationToken::new();
        token.cancel();
        let outcome = service.run_expiry("auction-id".to_string(), token).await;
        assert_eq!(outcome, ExpiryOutcome::Aborted);
    }
}
