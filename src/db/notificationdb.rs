// db/notificationdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::notificationmodel::{Notification, NotificationPriority, NotificationType};

const NOTIFICATION_COLUMNS: &str = r#"
    id, recipient_id, sender_id, notif_type, title, message, link,
    related_job_id, is_read, priority, created_at
"#;

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub notif_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub related_job_id: Option<Uuid>,
    pub priority: NotificationPriority,
}

#[async_trait]
pub trait NotificationExt {
    async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, sqlx::Error>;

    /// Most recent notifications for a recipient, capped at 50.
    async fn get_user_notifications(
        &self,
        recipient_id: Uuid,
    ) -> Result<Vec<Notification>, sqlx::Error>;

    async fn get_unread_count(&self, recipient_id: Uuid) -> Result<i64, sqlx::Error>;

    async fn get_notification(&self, id: Uuid) -> Result<Option<Notification>, sqlx::Error>;

    async fn mark_as_read(&self, id: Uuid) -> Result<Notification, sqlx::Error>;

    async fn mark_all_as_read(&self, recipient_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn delete_notification(&self, id: Uuid) -> Result<(), sqlx::Error>;

    async fn clear_all_notifications(&self, recipient_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (
                recipient_id, sender_id, notif_type, title, message, link,
                related_job_id, priority
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(new.recipient_id)
        .bind(new.sender_id)
        .bind(new.notif_type)
        .bind(new.title)
        .bind(new.message)
        .bind(new.link)
        .bind(new.related_job_id)
        .bind(new.priority)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_notifications(
        &self,
        recipient_id: Uuid,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            LIMIT 50
            "#
        ))
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_unread_count(&self, recipient_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn get_notification(&self, id: Uuid) -> Result<Option<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn mark_as_read(&self, id: Uuid) -> Result<Notification, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    async fn mark_all_as_read(&self, recipient_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_notification(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear_all_notifications(&self, recipient_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE recipient_id = $1")
            .bind(recipient_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
