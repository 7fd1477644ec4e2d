// dtos/wagedtos.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::wagemodel::{WagePeriodType, WageRecord, WageStatus, WageSummary, WageType};
use crate::utils::currency::paise_to_rupees;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWageRecordDto {
    pub worker_id: Uuid,
    pub job_id: Uuid,

    pub work_date: Option<NaiveDate>,

    #[validate(range(min = 0.0, message = "Hours worked cannot be negative"))]
    pub hours_worked: Option<f64>,

    #[validate(range(min = 0, message = "Days worked cannot be negative"))]
    pub days_worked: Option<i32>,

    pub wage_type: Option<WageType>,

    // Rupees; converted to paise before storage.
    #[validate(range(min = 0.0, message = "Rate per day cannot be negative"))]
    pub rate_per_day: Option<f64>,

    #[validate(range(min = 0.0, message = "Rate per hour cannot be negative"))]
    pub rate_per_hour: Option<f64>,

    pub period_type: Option<WagePeriodType>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,

    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWagePaymentDto {
    pub wage_record_id: Uuid,
    pub payment_id: Uuid,

    #[validate(range(min = 0.01, message = "Amount must be greater than zero"))]
    pub amount_paid: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageRecordDto {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub job_id: Uuid,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub days_worked: i32,
    pub wage_type: WageType,
    pub rate_per_day: f64,
    pub rate_per_hour: f64,
    pub total_earned: f64,
    pub total_paid: f64,
    pub remaining_balance: f64,
    pub status: WageStatus,
    pub period_type: WagePeriodType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub payments: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WageRecord> for WageRecordDto {
    fn from(record: WageRecord) -> Self {
        WageRecordDto {
            id: record.id,
            worker_id: record.worker_id,
            employer_id: record.employer_id,
            job_id: record.job_id,
            work_date: record.work_date,
            hours_worked: record.hours_worked,
            days_worked: record.days_worked,
            wage_type: record.wage_type,
            rate_per_day: paise_to_rupees(record.rate_per_day),
            rate_per_hour: paise_to_rupees(record.rate_per_hour),
            total_earned: paise_to_rupees(record.total_earned),
            total_paid: paise_to_rupees(record.total_paid),
            remaining_balance: paise_to_rupees(record.remaining_balance),
            status: record.status,
            period_type: record.period_type,
            period_start: record.period_start,
            period_end: record.period_end,
            description: record.description,
            notes: record.notes,
            payments: Vec::new(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl WageRecordDto {
    pub fn with_payments(mut self, payments: Vec<Uuid>) -> Self {
        self.payments = payments;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageSummaryDto {
    pub total_earned: f64,
    pub total_paid: f64,
    pub total_remaining: f64,
    pub pending_records: i64,
    pub partially_paid_records: i64,
    pub fully_paid_records: i64,
}

impl From<WageSummary> for WageSummaryDto {
    fn from(summary: WageSummary) -> Self {
        WageSummaryDto {
            total_earned: paise_to_rupees(summary.total_earned),
            total_paid: paise_to_rupees(summary.total_paid),
            total_remaining: paise_to_rupees(summary.total_remaining),
            pending_records: summary.pending_records,
            partially_paid_records: summary.partially_paid_records,
            fully_paid_records: summary.fully_paid_records,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageRecordResponseDto {
    pub success: bool,
    pub message: String,
    pub wage_record: WageRecordDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageRecordListResponseDto {
    pub success: bool,
    pub wage_records: Vec<WageRecordDto>,
    pub summary: WageSummaryDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WageSummaryResponseDto {
    pub success: bool,
    pub summary: WageSummaryDto,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBankDetailsDto {
    #[validate(length(min = 1, message = "Account holder name is required"))]
    pub account_holder_name: String,

    #[validate(length(min = 6, max = 20, message = "Account number must be 6-20 digits"))]
    pub account_number: String,

    #[validate(length(min = 11, max = 11, message = "IFSC code must be 11 characters"))]
    pub ifsc_code: String,

    #[validate(length(min = 1, message = "Bank name is required"))]
    pub bank_name: String,

    pub branch_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUpiDetailsDto {
    #[validate(length(min = 3, message = "UPI id is required"))]
    pub upi_id: String,

    pub upi_name: Option<String>,
}
