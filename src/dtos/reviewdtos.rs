// dtos/reviewdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::reviewmodel::{Review, ReviewCategories, ReviewType};
use crate::service::rating::RatingStats;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewDto {
    pub reviewee_id: Uuid,
    pub job_id: Option<Uuid>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,

    pub review_type: ReviewType,

    pub categories: Option<ReviewCategoriesDto>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Copy)]
pub struct ReviewCategoriesDto {
    #[validate(range(min = 1, max = 5))]
    pub professionalism: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub communication: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub quality: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub punctuality: Option<i32>,
}

impl From<ReviewCategoriesDto> for ReviewCategories {
    fn from(dto: ReviewCategoriesDto) -> Self {
        ReviewCategories {
            professionalism: dto.professionalism,
            communication: dto.communication,
            quality: dto.quality,
            punctuality: dto.punctuality,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,

    pub categories: Option<ReviewCategoriesDto>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub review_type: ReviewType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<ReviewCategories>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        let categories = review.categories();
        ReviewDto {
            id: review.id,
            reviewer_id: review.reviewer_id,
            reviewee_id: review.reviewee_id,
            job_id: review.job_id,
            rating: review.rating,
            comment: review.comment,
            review_type: review.review_type,
            categories,
            is_verified: review.is_verified,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponseDto {
    pub success: bool,
    pub message: String,
    pub review: ReviewDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewListResponseDto {
    pub success: bool,
    pub message: String,
    pub reviews: Vec<ReviewDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RatingStatsResponseDto {
    pub success: bool,
    pub message: String,
    pub stats: RatingStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteReviewResponseDto {
    pub success: bool,
    pub message: String,
}
