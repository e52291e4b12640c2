use {
    crate::api::RestError,
    time::{
        Duration,
        OffsetDateTime,
    },
    uuid::Uuid,
};

pub type AuctionId = String;

const MIN_PRODUCT_NAME_LEN: usize = 2;
const MIN_CATEGORY_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionStatus {
    Active,
    Completed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct AuctionCreate {
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
}

impl Auction {
    /// Builds a new active auction with a fresh id.
    ///
    /// The creation time is truncated to whole seconds so the entity survives a
    /// round trip through storage unchanged.
    pub fn try_new(auction: AuctionCreate) -> Result<Self, RestError> {
        if auction.product_name.trim().chars().count() < MIN_PRODUCT_NAME_LEN {
            return Err(RestError::BadParameters(format!(
                "Product name must have at least {} characters",
                MIN_PRODUCT_NAME_LEN
            )));
        }
        if auction.category.trim().chars().count() < MIN_CATEGORY_LEN {
            return Err(RestError::BadParameters(format!(
                "Category must have at least {} characters",
                MIN_CATEGORY_LEN
            )));
        }
        if auction.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            return Err(RestError::BadParameters(format!(
                "Description must have at least {} characters",
                MIN_DESCRIPTION_LEN
            )));
        }

        let now = OffsetDateTime::now_utc();
        Ok(Self {
            id:            Uuid::new_v4().to_string(),
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition,
            status:        AuctionStatus::Active,
            creation_time: now - Duration::nanoseconds(now.nanosecond() as i64),
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == AuctionStatus::Active
    }
}

/// `Any` is the sentinel that disables status filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    Any,
    Only(AuctionStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: AuctionStatus) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Only(expected) => *expected == status,
        }
    }
}

impl From<Option<AuctionStatus>> for StatusFilter {
    fn from(status: Option<AuctionStatus>) -> Self {
        status.map_or(StatusFilter::Any, StatusFilter::Only)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuctionFilter {
    pub status:       StatusFilter,
    pub category:     Option<String>,
    pub product_name: Option<String>,
}

impl AuctionFilter {
    pub fn new(
        status: StatusFilter,
        category: Option<String>,
        product_name: Option<String>,
    ) -> Self {
        Self {
            status,
            category: category.filter(|c| !c.is_empty()),
            product_name: product_name.filter(|p| !p.is_empty()),
        }
    }

    pub fn matches(&self, auction: &Auction) -> bool {
        self.status.matches(auction.status)
            && self
                .category
                .as_ref()
                .map_or(true, |c| contains_ignore_case(&auction.category, c))
            && self
                .product_name
                .as_ref()
                .map_or(true, |p| contains_ignore_case(&auction.product_name, p))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
