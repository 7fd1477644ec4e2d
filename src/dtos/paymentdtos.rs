// dtos/paymentdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dtos::wagedtos::WageRecordDto;
use crate::models::paymentmodel::{Payment, PaymentMethod, PaymentStatus, PaymentType};
use crate::utils::currency::paise_to_rupees;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDto {
    pub worker_id: Uuid,
    pub job_id: Uuid,
    pub application_id: Option<Uuid>,

    // Rupees; converted to paise before storage.
    #[validate(range(min = 0.01, message = "Amount must be greater than zero"))]
    pub amount: f64,

    pub payment_type: Option<PaymentType>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompletePaymentDto {
    #[validate(length(min = 1, message = "Order ID is required"))]
    pub order_id: String,

    pub payment_method: Option<PaymentMethod>,

    /// Explicit target for the ledger application; when absent the most
    /// recent open wage record for the worker/job pair is used.
    pub wage_record_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCashPaymentDto {
    pub worker_id: Uuid,
    pub job_id: Uuid,
    pub application_id: Option<Uuid>,

    #[validate(range(min = 0.01, message = "Amount must be greater than zero"))]
    pub amount: f64,

    pub payment_type: Option<PaymentType>,

    #[validate(length(min = 1, message = "Cash collector name is required"))]
    pub cash_collected_by: String,

    pub notes: Option<String>,
    pub wage_record_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub job_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Uuid>,
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_payment_id: Option<String>,
    pub receipt_number: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_collected_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_collection_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        PaymentDto {
            id: payment.id,
            worker_id: payment.worker_id,
            employer_id: payment.employer_id,
            job_id: payment.job_id,
            application_id: payment.application_id,
            transaction_id: payment.transaction_id,
            order_id: payment.order_id,
            gateway_payment_id: payment.gateway_payment_id,
            receipt_number: payment.receipt_number,
            amount: paise_to_rupees(payment.amount),
            currency: payment.currency,
            status: payment.status,
            payment_method: payment.payment_method,
            payment_type: payment.payment_type,
            description: payment.description,
            cash_collected_by: payment.cash_collected_by,
            cash_collection_date: payment.cash_collection_date,
            notes: payment.notes,
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponseDto {
    pub success: bool,
    pub message: String,
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment: PaymentDto,
    pub mock_payment: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponseDto {
    pub success: bool,
    pub message: String,
    pub payment: PaymentDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wage_record: Option<WageRecordDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentListResponseDto {
    pub success: bool,
    pub payments: Vec<PaymentDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponseDto {
    pub success: bool,
    pub payment: PaymentDto,
}
