// handler/review.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        notificationdb::{NewNotification, NotificationExt},
        reviewdb::{NewReview, ReviewExt, ReviewUpdate},
        userdb::UserExt,
    },
    dtos::reviewdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddleware,
    models::notificationmodel::{NotificationPriority, NotificationType},
    service::rating,
    AppState,
};

/// Review writes; mounted behind the auth middleware.
pub fn review_handler() -> Router {
    Router::new()
        .route("/create", post(create_review))
        .route("/update/:id", put(update_review))
        .route("/delete/:id", delete(delete_review))
}

/// Review reads: anyone may look up a user's reviews and rating stats.
pub fn review_public_handler() -> Router {
    Router::new()
        .route("/user/:user_id", get(get_reviews_for_user))
        .route("/by-user/:user_id", get(get_reviews_by_user))
        .route("/stats/:user_id", get(get_rating_stats))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    if let Some(categories) = &body.categories {
        categories
            .validate()
            .map_err(|e| HttpError::bad_request(e.to_string()))?;
    }

    if body.reviewee_id == auth.user.id {
        return Err(HttpError::bad_request("You cannot review yourself"));
    }

    let reviewee = app_state
        .db_client
        .get_user(body.reviewee_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if reviewee.is_none() {
        return Err(HttpError::not_found("User to review not found"));
    }

    let review = app_state
        .db_client
        .save_review(NewReview {
            reviewer_id: auth.user.id,
            reviewee_id: body.reviewee_id,
            job_id: body.job_id,
            rating: body.rating,
            comment: body.comment,
            review_type: body.review_type,
            categories: body.categories.map(Into::into),
        })
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let aggregate = app_state
        .db_client
        .refresh_user_rating(body.reviewee_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        review_id = %review.id,
        reviewee_id = %body.reviewee_id,
        new_average = aggregate.average,
        "review created"
    );

    let notify = app_state
        .db_client
        .create_notification(NewNotification {
            recipient_id: body.reviewee_id,
            sender_id: Some(auth.user.id),
            notif_type: NotificationType::ReviewReceived,
            title: "New Review Received".to_string(),
            message: format!("{} left you a {}-star review", auth.user.fullname, body.rating),
            link: Some("/reviews".to_string()),
            related_job_id: body.job_id,
            priority: NotificationPriority::Medium,
        })
        .await;

    if let Err(e) = notify {
        tracing::error!(review_id = %review.id, "failed to create review notification: {}", e);
    }

    let response = Json(ReviewResponseDto {
        success: true,
        message: "Review submitted successfully".to_string(),
        review: review.into(),
    });

    Ok((StatusCode::CREATED, response))
}

pub async fn get_reviews_for_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews_for_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewListResponseDto {
        success: true,
        message: "Reviews retrieved successfully".to_string(),
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_reviews_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews_by_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewListResponseDto {
        success: true,
        message: "Reviews retrieved successfully".to_string(),
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_rating_stats(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews_for_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(RatingStatsResponseDto {
        success: true,
        message: "Rating stats retrieved successfully".to_string(),
        stats: rating::rating_stats(&reviews),
    }))
}

pub async fn update_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(review_id): Path<Uuid>,
    Json(body): Json<UpdateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    if let Some(categories) = &body.categories {
        categories
            .validate()
            .map_err(|e| HttpError::bad_request(e.to_string()))?;
    }

    let review = app_state
        .db_client
        .get_review(review_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Review not found"))?;

    if review.reviewer_id != auth.user.id {
        return Err(HttpError::forbidden("You can only edit your own reviews"));
    }

    let updated = app_state
        .db_client
        .update_review(
            review_id,
            ReviewUpdate {
                rating: body.rating,
                comment: body.comment,
                categories: body.categories.map(Into::into),
            },
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .refresh_user_rating(updated.reviewee_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewResponseDto {
        success: true,
        message: "Review updated successfully".to_string(),
        review: updated.into(),
    }))
}

pub async fn delete_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let review = app_state
        .db_client
        .get_review(review_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Review not found"))?;

    if review.reviewer_id != auth.user.id {
        return Err(HttpError::forbidden("You can only delete your own reviews"));
    }

    app_state
        .db_client
        .delete_review(review_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // The aggregate must shrink with the deleted review, not freeze.
    app_state
        .db_client
        .refresh_user_rating(review.reviewee_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(DeleteReviewResponseDto {
        success: true,
        message: "Review deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_and_protected_review_routers_merge_cleanly() {
        // The read endpoints live on their own router so they can be
        // mounted without the auth layer; merging the two must not
        // produce overlapping paths.
        let _ = review_public_handler().merge(review_handler());
    }
}
