use {
    super::repository::{
        Database,
        Repository,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub mod close_auction;
pub mod create_auction;
pub mod get_auction_by_id;
pub mod get_auctions;
pub mod schedule_expiry;
pub mod shutdown;
pub mod update_auction_status;

/// How hard the expiry task tries to close an auction once its timer fired.
///
/// Only storage failures are retried. A budget of zero means a single attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosePolicy {
    pub retry_budget: u32,
    pub retry_delay:  Duration,
}

impl Default for ClosePolicy {
    fn default() -> Self {
        Self {
            retry_budget: 0,
            retry_delay:  Duration::from_secs(1),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub auction_interval: Duration,
    pub close_policy:     ClosePolicy,
}

pub struct ServiceInner {
    config:       Config,
    repo:         Arc<Repository>,
    task_tracker: TaskTracker,
    shutdown:     CancellationToken,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        db: impl Database,
        config: Config,
        task_tracker: TaskTracker,
        shutdown: CancellationToken,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            repo: Arc::new(Repository::new(db)),
            task_tracker,
            shutdown,
        }))
    }

    pub fn get_pending_expiries_count(&self) -> usize {
        self.repo.get_in_memory_expiries_count()
    }
}
