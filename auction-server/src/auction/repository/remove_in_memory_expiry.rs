use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub fn remove_in_memory_expiry(&self, auction_id: &entities::AuctionId) {
        self.in_memory_store.expiries.remove(auction_id);
        self.update_metrics();
    }
}
