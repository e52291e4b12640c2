use super::Service;

impl Service {
    /// Aborts every armed expiry and waits for all service tasks to exit.
    pub async fn shutdown(&self) {
        tracing::info!(
            pending_expiries = self.get_pending_expiries_count(),
            "Shutting down auction service..."
        );
        self.shutdown.cancel();
        self.task_tracker.close();
        self.task_tracker.wait().await;
        tracing::info!("Auction service tasks drained");
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
            service::{
                create_auction::CreateAuctionInput,
                get_auction_by_id::GetAuctionByIdInput,
            },
        },
        std::time::Duration,
    };

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drains_expiries() {
        let service = Service::new_in_memory(Duration::from_secs(300));
        let mut auction_ids = vec![];
        for _ in 0..3 {
            let auction = service
                .create_auction(CreateAuctionInput {
                    auction: get_auction_create("Mountain Bike", "Sports"),
                })
                .await
                .unwrap();
            auction_ids.push(auction.id);
        }
        assert_eq!(service.get_pending_expiries_count(), 3);

        service.shutdown().await;
        assert_eq!(service.get_pending_expiries_count(), 0);
        for auction_id in auction_ids {
            let auction = service
                .get_auction_by_id(GetAuctionByIdInput { auction_id })
                .await
                .unwrap();
            assert_eq!(auction.status, AuctionStatus::Active);
        }
    }
}
