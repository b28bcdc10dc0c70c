use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stores::Coordinate;

/// Sort order for discovery results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Distance,
    Rating,
    DeliveryTime,
    DeliveryFee,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Distance => write!(f, "distance"),
            SortBy::Rating => write!(f, "rating"),
            SortBy::DeliveryTime => write!(f, "delivery_time"),
            SortBy::DeliveryFee => write!(f, "delivery_fee"),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(SortBy::Distance),
            "rating" => Ok(SortBy::Rating),
            "delivery_time" => Ok(SortBy::DeliveryTime),
            "delivery_fee" => Ok(SortBy::DeliveryFee),
            other => Err(format!(
                "unknown sort key '{other}'; expected one of: distance, rating, delivery_time, delivery_fee"
            )),
        }
    }
}

/// The caller's search, filter, and sort criteria for one discovery request.
///
/// Every field is optional; `FilterSpec::default()` means "all eligible
/// stores, default ordering". `min_rating` follows the marketplace UI, where
/// 0 means the rating slider is untouched and no rating filter applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub search_query: Option<String>,
    pub category_id: Option<Uuid>,
    pub min_rating: f64,
    pub max_delivery_time_minutes: Option<u32>,
    pub free_delivery_only: bool,
    pub user_location: Option<Coordinate>,
    pub max_distance_km: Option<f64>,
    pub sort_by: Option<SortBy>,
}

impl FilterSpec {
    /// Returns `true` if the customer's position is known for this request.
    #[must_use]
    pub fn has_location(&self) -> bool {
        self.user_location.is_some()
    }

    /// Returns the trimmed search query, or `None` when blank.
    ///
    /// A whitespace-only query box behaves the same as an empty one.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
