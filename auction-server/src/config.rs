use {
    crate::auction::service::ClosePolicy,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::time::Duration,
};

mod server;

/// Used when the auction interval is missing or can not be parsed.
pub const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(5 * 60);
const DEFAULT_CLOSE_RETRY_BUDGET: &str = "0";
const DEFAULT_CLOSE_RETRY_DELAY: &str = "1s";

// `Options` is the top-level set of command-line args for the auction server.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
#[allow(clippy::large_enum_variant)]
pub enum Options {
    /// Run the auction server service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub auction: AuctionOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Auction Options")]
#[group(id = "Auction")]
pub struct AuctionOptions {
    /// Time after creation at which an auction is completed, e.g. `20ms`, `2m` or `1m30s`.
    /// Falls back to 5 minutes when missing or malformed.
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    pub auction_interval: Option<String>,

    /// How many times a failed close of an expired auction is retried.
    #[arg(long = "close-retry-budget")]
    #[arg(env = "AUCTION_CLOSE_RETRY_BUDGET")]
    #[arg(default_value = DEFAULT_CLOSE_RETRY_BUDGET)]
    pub close_retry_budget: u32,

    /// Delay between close retries of an expired auction.
    #[arg(long = "close-retry-delay")]
    #[arg(env = "AUCTION_CLOSE_RETRY_DELAY")]
    #[arg(default_value = DEFAULT_CLOSE_RETRY_DELAY)]
    #[arg(value_parser = humantime::parse_duration)]
    pub close_retry_delay: Duration,
}

impl AuctionOptions {
    pub fn auction_interval(&self) -> Duration {
        parse_auction_interval(self.auction_interval.as_deref())
    }

    pub fn close_policy(&self) -> ClosePolicy {
        ClosePolicy {
            retry_budget: self.close_retry_budget,
            retry_delay:  self.close_retry_delay,
        }
    }
}

/// Parses a duration such as `20ms`, `2m` or `1m30s`.
///
/// Never fails: a missing or malformed value yields [`DEFAULT_AUCTION_INTERVAL`].
pub fn parse_auction_interval(value: Option<&str>) -> Duration {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        tracing::warn!(
            default = ?DEFAULT_AUCTION_INTERVAL,
            "Auction interval is not set, using default"
        );
        return DEFAULT_AUCTION_INTERVAL;
    };
    match humantime::parse_duration(value) {
        Ok(interval) => interval,
        Err(err) => {
            tracing::warn!(
                value,
                error = %err,
                default = ?DEFAULT_AUCTION_INTERVAL,
                "Failed to parse auction interval, using default"
            );
            DEFAULT_AUCTION_INTERVAL
        }
    }
}
