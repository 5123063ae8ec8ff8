//! Read-time rating aggregation.
//!
//! Averages are never persisted; every listing or dashboard request
//! re-derives them from the raw rating rows via [`summarize`].

use std::collections::BTreeMap;

use serde::Serialize;

/// Inclusive bounds for a rating value.
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Check that a submitted rating value is an integer in `[1, 5]`.
pub fn is_valid_rating(value: i16) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&value)
}

/// Aggregated statistics over the ratings of a single store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Mean rating rounded to 2 decimals; `0.0` when there are no ratings.
    pub average_rating: f64,
    pub total_ratings: i64,
    /// Count per star value. All five keys are always present.
    pub distribution: BTreeMap<i16, i64>,
}

impl RatingSummary {
    /// Summary for a store with no ratings: zero average, empty distribution.
    pub fn empty() -> Self {
        summarize(&[])
    }
}

/// Compute average, count, and distribution over raw rating values.
///
/// The average defaults to an explicit `0.0` for the empty case -- never
/// NaN and never null on the wire. Values outside `[1, 5]` cannot reach
/// this function: the schema CHECK constraint rejects them at insert.
pub fn summarize(values: &[i16]) -> RatingSummary {
    let mut distribution: BTreeMap<i16, i64> =
        (MIN_RATING..=MAX_RATING).map(|v| (v, 0)).collect();

    let mut sum: i64 = 0;
    for &value in values {
        debug_assert!(is_valid_rating(value), "rating out of range: {value}");
        sum += i64::from(value);
        if let Some(count) = distribution.get_mut(&value) {
            *count += 1;
        }
    }

    let total = values.len() as i64;
    let average = if total > 0 {
        round2(sum as f64 / total as f64)
    } else {
        0.0
    };

    RatingSummary {
        average_rating: average,
        total_ratings: total,
        distribution,
    }
}

/// Round to 2 decimal places (half away from zero, matching the wire format).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
