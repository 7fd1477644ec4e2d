// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{User, UserRole};

pub const USER_COLUMNS: &str = r#"
    id, fullname, email, phone_number, password, role,
    preferred_language, rating_average, rating_count,
    bank_account_holder_name, bank_account_number, bank_ifsc_code,
    bank_name, bank_branch_name, upi_id, upi_name,
    created_at, updated_at
"#;

#[derive(Debug, Clone)]
pub struct BankDetails {
    pub account_holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub branch_name: Option<String>,
}

#[async_trait]
pub trait UserExt {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    async fn save_user(
        &self,
        fullname: String,
        email: String,
        phone_number: String,
        password: String,
        role: UserRole,
        preferred_language: Option<String>,
    ) -> Result<User, sqlx::Error>;

    /// Overwrite the denormalized rating aggregate on the user row.
    async fn update_user_rating(
        &self,
        user_id: Uuid,
        average: f64,
        count: i32,
    ) -> Result<User, sqlx::Error>;

    async fn update_bank_details(
        &self,
        user_id: Uuid,
        details: BankDetails,
    ) -> Result<User, sqlx::Error>;

    async fn update_upi_details(
        &self,
        user_id: Uuid,
        upi_id: String,
        upi_name: Option<String>,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_user(
        &self,
        fullname: String,
        email: String,
        phone_number: String,
        password: String,
        role: UserRole,
        preferred_language: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (fullname, email, phone_number, password, role, preferred_language)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(fullname)
        .bind(email)
        .bind(phone_number)
        .bind(password)
        .bind(role)
        .bind(preferred_language)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_rating(
        &self,
        user_id: Uuid,
        average: f64,
        count: i32,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET rating_average = $2,
                rating_count = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(average)
        .bind(count)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_bank_details(
        &self,
        user_id: Uuid,
        details: BankDetails,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET bank_account_holder_name = $2,
                bank_account_number = $3,
                bank_ifsc_code = $4,
                bank_name = $5,
                bank_branch_name = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(details.account_holder_name)
        .bind(details.account_number)
        .bind(details.ifsc_code)
        .bind(details.bank_name)
        .bind(details.branch_name)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_upi_details(
        &self,
        user_id: Uuid,
        upi_id: String,
        upi_name: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET upi_id = $2,
                upi_name = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(upi_id)
        .bind(upi_name)
        .fetch_one(&self.pool)
        .await
    }
}
