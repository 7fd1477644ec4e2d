// handler/notification.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    db::notificationdb::NotificationExt,
    dtos::notificationdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

pub fn notification_handler() -> Router {
    Router::new()
        .route("/", get(get_notifications))
        .route("/unread-count", get(get_unread_count))
        .route("/read-all", put(mark_all_as_read))
        .route("/clear-all", delete(clear_all_notifications))
        .route("/read/:id", put(mark_as_read))
        .route("/delete/:id", delete(delete_notification))
}

pub async fn get_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .db_client
        .get_user_notifications(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let unread_count = app_state
        .db_client
        .get_unread_count(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(NotificationListResponseDto {
        success: true,
        message: "Notifications retrieved successfully".to_string(),
        notifications: notifications.into_iter().map(Into::into).collect(),
        unread_count,
    }))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .db_client
        .get_unread_count(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UnreadCountResponseDto {
        success: true,
        message: "Unread count retrieved successfully".to_string(),
        count,
    }))
}

pub async fn mark_as_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let notification = app_state
        .db_client
        .get_notification(notification_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Notification not found"))?;

    if notification.recipient_id != auth.user.id {
        return Err(HttpError::forbidden(
            "Not authorized to modify this notification",
        ));
    }

    let notification = app_state
        .db_client
        .mark_as_read(notification_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(NotificationResponseDto {
        success: true,
        message: "Notification marked as read".to_string(),
        notification: notification.into(),
    }))
}

pub async fn mark_all_as_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .mark_all_as_read(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(NotificationAckResponseDto {
        success: true,
        message: format!("{} notifications marked as read", updated),
    }))
}

pub async fn delete_notification(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let notification = app_state
        .db_client
        .get_notification(notification_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Notification not found"))?;

    if notification.recipient_id != auth.user.id {
        return Err(HttpError::forbidden(
            "Not authorized to delete this notification",
        ));
    }

    app_state
        .db_client
        .delete_notification(notification_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(NotificationAckResponseDto {
        success: true,
        message: "Notification deleted".to_string(),
    }))
}

pub async fn clear_all_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .db_client
        .clear_all_notifications(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(NotificationAckResponseDto {
        success: true,
        message: format!("{} notifications cleared", removed),
    }))
}
