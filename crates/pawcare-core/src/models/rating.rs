//! Rating/review models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lowest allowed star value.
pub const MIN_RATING: u8 = 1;
/// Highest allowed star value.
pub const MAX_RATING: u8 = 5;

/// A clinic review. One per (user, clinic) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: i64,
    pub clinic_id: i64,
    pub user_id: String,
    pub rating_value: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Body for posting a review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    pub clinic_id: i64,
    pub rating_value: u8,
    pub comment: Option<String>,
}

impl NewRating {
    /// Check the star value is within 1..=5.
    pub fn is_valid(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating_value)
    }
}
