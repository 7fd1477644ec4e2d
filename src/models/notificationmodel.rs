use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    JobPosted,
    JobInvitation,
    ApplicationReceived,
    ApplicationAccepted,
    ApplicationRejected,
    JobCompleted,
    ReviewReceived,
    PaymentReceived,
    NewMessage,
    SkillVerified,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "notification_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub notif_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub related_job_id: Option<Uuid>,
    pub is_read: bool,
    pub priority: NotificationPriority,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
