use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "review_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReviewType {
    EmployerToWorker,
    WorkerToEmployer,
}

/// Optional per-category sub-scores on a review, each 1-5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReviewCategories {
    pub professionalism: Option<i32>,
    pub communication: Option<i32>,
    pub quality: Option<i32>,
    pub punctuality: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub job_id: Option<Uuid>,
    pub rating: i32,
    pub comment: Option<String>,
    pub review_type: ReviewType,
    pub professionalism: Option<i32>,
    pub communication: Option<i32>,
    pub quality: Option<i32>,
    pub punctuality: Option<i32>,
    pub has_categories: bool,
    pub is_verified: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn categories(&self) -> Option<ReviewCategories> {
        if self.has_categories {
            Some(ReviewCategories {
                professionalism: self.professionalism,
                communication: self.communication,
                quality: self.quality,
                punctuality: self.punctuality,
            })
        } else {
            None
        }
    }
}
