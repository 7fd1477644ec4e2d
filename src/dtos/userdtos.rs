// dtos/userdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::usermodel::{User, UserRole};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub fullname: String,

    #[validate(email(message = "Email is invalid"))]
    pub email: String,

    #[validate(length(min = 10, max = 15, message = "Phone number must be 10-15 digits"))]
    pub phone_number: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub role: UserRole,

    pub preferred_language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginUserDto {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUserDto {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
    pub preferred_language: Option<String>,
    pub rating_average: f64,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            role: user.role,
            preferred_language: user.preferred_language.clone(),
            rating_average: user.rating_average,
            rating_count: user.rating_count,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub success: bool,
    pub message: String,
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: FilterUserDto,
}
