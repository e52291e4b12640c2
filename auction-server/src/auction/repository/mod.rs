use {
    super::entities,
    axum_prometheus::metrics,
    dashmap::DashMap,
    tokio_util::sync::CancellationToken,
};

mod add_auction;
mod add_in_memory_expiry;
mod complete_auction;
mod get_auction_by_id;
mod get_auctions;
mod get_in_memory_expiries_count;
mod in_memory_db;
mod models;
mod remove_in_memory_expiry;
mod update_auction_status;

pub use {
    in_memory_db::InMemoryDB,
    models::*,
};

pub const PENDING_EXPIRIES_METRIC: &str = "auction_pending_expiries";

/// Expiry tasks that are still armed or closing, keyed by auction id.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub expiries: DashMap<entities::AuctionId, CancellationToken>,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
    pub db:              Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db:              Box::new(db),
        }
    }

    pub(super) fn update_metrics(&self) {
        metrics::gauge!(PENDING_EXPIRIES_METRIC).set(self.in_memory_store.expiries.len() as f64);
    }
}
