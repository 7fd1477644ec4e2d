//! Rating aggregation.
//!
//! `users.rating_average` and `users.rating_count` are denormalized and
//! recomputed by a full scan of the reviewee's reviews on every review
//! create, update or delete. The scan stays in one place so the handlers
//! only ever call [`aggregate`] / [`rating_stats`].

use serde::{Deserialize, Serialize};

use crate::models::reviewmodel::Review;

/// Denormalized (average, count) pair stored on the user row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub average: f64,
    pub count: i32,
}

impl RatingAggregate {
    pub fn zero() -> Self {
        RatingAggregate { average: 0.0, count: 0 }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverages {
    pub professionalism: f64,
    pub communication: f64,
    pub quality: f64,
    pub punctuality: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RatingStats {
    pub average_rating: f64,
    pub total_reviews: i32,
    /// Counts for ratings 1 through 5, index 0 holding the one-star count.
    pub rating_distribution: [i32; 5],
    pub category_averages: CategoryAverages,
}

pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean over all ratings, rounded to one decimal place. Zero reviews
/// resets the aggregate to (0.0, 0).
pub fn aggregate(ratings: &[i32]) -> RatingAggregate {
    if ratings.is_empty() {
        return RatingAggregate::zero();
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    RatingAggregate {
        average: round_to_one_decimal(sum as f64 / ratings.len() as f64),
        count: ratings.len() as i32,
    }
}

/// Full statistics for a reviewee's profile page.
///
/// The overall average divides by all reviews, while each category average
/// divides only by the reviews that supplied a categories object. The
/// asymmetric denominators match the original product behavior and are kept
/// deliberately.
pub fn rating_stats(reviews: &[Review]) -> RatingStats {
    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
    let overall = aggregate(&ratings);

    let mut distribution = [0i32; 5];
    for rating in &ratings {
        if (1..=5).contains(rating) {
            distribution[(*rating - 1) as usize] += 1;
        }
    }

    let mut totals = (0i64, 0i64, 0i64, 0i64);
    let mut with_categories = 0i64;
    for review in reviews {
        if let Some(categories) = review.categories() {
            totals.0 += categories.professionalism.unwrap_or(0) as i64;
            totals.1 += categories.communication.unwrap_or(0) as i64;
            totals.2 += categories.quality.unwrap_or(0) as i64;
            totals.3 += categories.punctuality.unwrap_or(0) as i64;
            with_categories += 1;
        }
    }

    let category_averages = if with_categories > 0 {
        let n = with_categories as f64;
        CategoryAverages {
            professionalism: round_to_one_decimal(totals.0 as f64 / n),
            communication: round_to_one_decimal(totals.1 as f64 / n),
            quality: round_to_one_decimal(totals.2 as f64 / n),
            punctuality: round_to_one_decimal(totals.3 as f64 / n),
        }
    } else {
        CategoryAverages::default()
    };

    RatingStats {
        average_rating: overall.average,
        total_reviews: overall.count,
        rating_distribution: distribution,
        category_averages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reviewmodel::ReviewType;
    use chrono::Utc;
    use uuid::Uuid;

    fn review(rating: i32, categories: Option<(i32, i32, i32, i32)>) -> Review {
        let now = Utc::now();
        Review {
            id: Uuid::new_v4(),
            reviewer_id: Uuid::new_v4(),
            reviewee_id: Uuid::new_v4(),
            job_id: None,
            rating,
            comment: None,
            review_type: ReviewType::EmployerToWorker,
            professionalism: categories.map(|c| c.0),
            communication: categories.map(|c| c.1),
            quality: categories.map(|c| c.2),
            punctuality: categories.map(|c| c.3),
            has_categories: categories.is_some(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn average_and_count_over_review_sequence() {
        // [5,4,3] -> 4.0/3; delete the 3 -> 4.5/2; delete the rest -> 0/0.
        assert_eq!(aggregate(&[5, 4, 3]), RatingAggregate { average: 4.0, count: 3 });
        assert_eq!(aggregate(&[5, 4]), RatingAggregate { average: 4.5, count: 2 });
        assert_eq!(aggregate(&[]), RatingAggregate::zero());
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        assert_eq!(aggregate(&[5, 4, 4]).average, 4.3);
        assert_eq!(aggregate(&[1, 2]).average, 1.5);
    }

    #[test]
    fn distribution_buckets() {
        let reviews: Vec<Review> = [5, 5, 4, 1].iter().map(|r| review(*r, None)).collect();
        let stats = rating_stats(&reviews);
        assert_eq!(stats.rating_distribution, [1, 0, 0, 1, 2]);
    }

    #[test]
    fn category_denominator_counts_only_reviews_with_categories() {
        // Categories on 2 of 3 reviews: category averages divide by 2 while
        // the overall average divides by 3.
        let reviews = vec![
            review(5, Some((5, 4, 5, 4))),
            review(4, Some((3, 4, 3, 4))),
            review(3, None),
        ];
        let stats = rating_stats(&reviews);
        assert_eq!(stats.average_rating, 4.0);
        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.category_averages.professionalism, 4.0);
        assert_eq!(stats.category_averages.communication, 4.0);
        assert_eq!(stats.category_averages.quality, 4.0);
        assert_eq!(stats.category_averages.punctuality, 4.0);
    }

    #[test]
    fn no_categories_anywhere_yields_zero_category_averages() {
        let reviews = vec![review(4, None), review(2, None)];
        let stats = rating_stats(&reviews);
        assert_eq!(stats.category_averages, CategoryAverages::default());
        assert_eq!(stats.average_rating, 3.0);
    }
}
