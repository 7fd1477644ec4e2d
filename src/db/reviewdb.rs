// db/reviewdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use super::userdb::UserExt;
use crate::models::reviewmodel::{Review, ReviewCategories, ReviewType};
use crate::service::rating::{self, RatingAggregate};

const REVIEW_COLUMNS: &str = r#"
    id, reviewer_id, reviewee_id, job_id, rating, comment, review_type,
    professionalism, communication, quality, punctuality, has_categories,
    is_verified, created_at, updated_at
"#;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub job_id: Option<Uuid>,
    pub rating: i32,
    pub comment: Option<String>,
    pub review_type: ReviewType,
    pub categories: Option<ReviewCategories>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub categories: Option<ReviewCategories>,
}

#[async_trait]
pub trait ReviewExt {
    async fn save_review(&self, new: NewReview) -> Result<Review, sqlx::Error>;

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>, sqlx::Error>;

    /// Reviews received by a user, newest first.
    async fn get_reviews_for_user(&self, reviewee_id: Uuid)
        -> Result<Vec<Review>, sqlx::Error>;

    /// Reviews written by a user, newest first.
    async fn get_reviews_by_user(&self, reviewer_id: Uuid)
        -> Result<Vec<Review>, sqlx::Error>;

    async fn update_review(
        &self,
        id: Uuid,
        update: ReviewUpdate,
    ) -> Result<Review, sqlx::Error>;

    async fn delete_review(&self, id: Uuid) -> Result<(), sqlx::Error>;

    /// Recompute the reviewee's denormalized rating aggregate by scanning
    /// all of their reviews, and write it back to the user row. Called
    /// after every review create, update or delete.
    async fn refresh_user_rating(
        &self,
        reviewee_id: Uuid,
    ) -> Result<RatingAggregate, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn save_review(&self, new: NewReview) -> Result<Review, sqlx::Error> {
        let categories = new.categories;
        sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (
                reviewer_id, reviewee_id, job_id, rating, comment, review_type,
                professionalism, communication, quality, punctuality, has_categories
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(new.reviewer_id)
        .bind(new.reviewee_id)
        .bind(new.job_id)
        .bind(new.rating)
        .bind(new.comment)
        .bind(new.review_type)
        .bind(categories.and_then(|c| c.professionalism))
        .bind(categories.and_then(|c| c.communication))
        .bind(categories.and_then(|c| c.quality))
        .bind(categories.and_then(|c| c.punctuality))
        .bind(categories.is_some())
        .fetch_one(&self.pool)
        .await
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_reviews_for_user(
        &self,
        reviewee_id: Uuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews
            WHERE reviewee_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(reviewee_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_reviews_by_user(
        &self,
        reviewer_id: Uuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews
            WHERE reviewer_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(reviewer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_review(
        &self,
        id: Uuid,
        update: ReviewUpdate,
    ) -> Result<Review, sqlx::Error> {
        let categories = update.categories;
        sqlx::query_as::<_, Review>(&format!(
            r#"
            UPDATE reviews
            SET rating = COALESCE($2, rating),
                comment = COALESCE($3, comment),
                professionalism = COALESCE($4, professionalism),
                communication = COALESCE($5, communication),
                quality = COALESCE($6, quality),
                punctuality = COALESCE($7, punctuality),
                has_categories = has_categories OR $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.rating)
        .bind(update.comment)
        .bind(categories.and_then(|c| c.professionalism))
        .bind(categories.and_then(|c| c.communication))
        .bind(categories.and_then(|c| c.quality))
        .bind(categories.and_then(|c| c.punctuality))
        .bind(categories.is_some())
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_review(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn refresh_user_rating(
        &self,
        reviewee_id: Uuid,
    ) -> Result<RatingAggregate, sqlx::Error> {
        let ratings: Vec<(i32,)> =
            sqlx::query_as("SELECT rating FROM reviews WHERE reviewee_id = $1")
                .bind(reviewee_id)
                .fetch_all(&self.pool)
                .await?;

        let ratings: Vec<i32> = ratings.into_iter().map(|(r,)| r).collect();
        let aggregate = rating::aggregate(&ratings);

        self.update_user_rating(reviewee_id, aggregate.average, aggregate.count)
            .await?;

        Ok(aggregate)
    }
}
