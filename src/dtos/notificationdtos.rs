// dtos/notificationdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::notificationmodel::{Notification, NotificationPriority, NotificationType};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: Uuid,
    pub recipient_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub notif_type: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_job_id: Option<Uuid>,
    pub is_read: bool,
    pub priority: NotificationPriority,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(notification: Notification) -> Self {
        NotificationDto {
            id: notification.id,
            recipient_id: notification.recipient_id,
            sender_id: notification.sender_id,
            notif_type: notification.notif_type,
            title: notification.title,
            message: notification.message,
            link: notification.link,
            related_job_id: notification.related_job_id,
            is_read: notification.is_read,
            priority: notification.priority,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponseDto {
    pub success: bool,
    pub message: String,
    pub notifications: Vec<NotificationDto>,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationResponseDto {
    pub success: bool,
    pub message: String,
    pub notification: NotificationDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnreadCountResponseDto {
    pub success: bool,
    pub message: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationAckResponseDto {
    pub success: bool,
    pub message: String,
}
