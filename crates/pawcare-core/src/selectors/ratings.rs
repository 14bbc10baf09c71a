use serde::Serialize;

use crate::models::{Rating, MAX_RATING, MIN_RATING};

/// One bar of the rating histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingBucket {
    pub stars: u8,
    pub count: usize,
    /// Share of all ratings, 0..=100
    pub percent: f64,
}

/// Rating distribution of a clinic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Buckets from 5 stars down to 1
    pub buckets: Vec<RatingBucket>,
    pub average: f64,
    pub total: usize,
}

/// Bucket ratings by star value. Out-of-range values are ignored.
pub fn rating_summary(ratings: &[Rating]) -> RatingSummary {
    let values: Vec<u8> = ratings
        .iter()
        .map(|r| r.rating_value)
        .filter(|v| (MIN_RATING..=MAX_RATING).contains(v))
        .collect();
    let total = values.len();

    let buckets = (MIN_RATING..=MAX_RATING)
        .rev()
        .map(|stars| {
            let count = values.iter().filter(|v| **v == stars).count();
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            RatingBucket {
                stars,
                count,
                percent,
            }
        })
        .collect();

    let average = if total == 0 {
        0.0
    } else {
        values.iter().map(|v| f64::from(*v)).sum::<f64>() / total as f64
    };

    RatingSummary {
        buckets,
        average,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rating(value: u8) -> Rating {
        Rating {
            id: i64::from(value),
            clinic_id: 1,
            user_id: "u".into(),
            rating_value: value,
            comment: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            user_name: None,
        }
    }

    #[test]
    fn test_distribution() {
        let summary = rating_summary(&[rating(5), rating(5), rating(4), rating(3)]);

        let percents: Vec<(u8, f64)> = summary.buckets.iter().map(|b| (b.stars, b.percent)).collect();
        assert_eq!(
            percents,
            vec![(5, 50.0), (4, 25.0), (3, 25.0), (2, 0.0), (1, 0.0)]
        );
        assert!((summary.average - 4.25).abs() < 1e-9);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn test_empty_is_all_zero() {
        let summary = rating_summary(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.buckets.len(), 5);
        assert!(summary.buckets.iter().all(|b| b.count == 0 && b.percent == 0.0));
    }
}
