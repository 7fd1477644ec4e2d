use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "wage_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WageType {
    Daily,
    Monthly,
    Hourly,
    Project,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "wage_period_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WagePeriodType {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "wage_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WageStatus {
    Pending,
    PartiallyPaid,
    FullyPaid,
    Overdue,
}

impl WageStatus {
    pub fn to_str(&self) -> &str {
        match self {
            WageStatus::Pending => "pending",
            WageStatus::PartiallyPaid => "partially_paid",
            WageStatus::FullyPaid => "fully_paid",
            WageStatus::Overdue => "overdue",
        }
    }
}

/// One unit of recorded work and the earnings it entitles a worker to.
///
/// All monetary columns are in paise. `total_earned` is computed once at
/// creation and never recomputed; `total_paid`, `remaining_balance` and
/// `status` are reconciled synchronously before every persisted write.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WageRecord {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub job_id: Uuid,

    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub days_worked: i32,
    pub wage_type: WageType,
    pub rate_per_day: i64,
    pub rate_per_hour: i64,

    pub total_earned: i64,
    pub total_paid: i64,
    pub remaining_balance: i64,
    pub status: WageStatus,

    pub period_type: WagePeriodType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,

    pub description: Option<String>,
    pub notes: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Aggregate totals across a worker's wage records, recomputed by a full
/// scan on demand (see `get_worker_wage_summary`).
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WageSummary {
    pub total_earned: i64,
    pub total_paid: i64,
    pub total_remaining: i64,
    pub pending_records: i64,
    pub partially_paid_records: i64,
    pub fully_paid_records: i64,
}
