use {
    super::Repository,
    crate::auction::entities,
    tokio_util::sync::CancellationToken,
};

impl Repository {
    pub fn add_in_memory_expiry(&self, auction_id: entities::AuctionId, token: CancellationToken) {
        self.in_memory_store.expiries.insert(auction_id, token);
        self.update_metrics();
    }
}
