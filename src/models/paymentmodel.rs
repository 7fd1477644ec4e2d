use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// Settlement state machine: pending may resolve to success, failed or
    /// cancelled; only a successful payment may be refunded. Everything else
    /// is terminal.
    pub fn can_transition(&self, to: PaymentStatus) -> bool {
        matches!(
            (self, to),
            (
                PaymentStatus::Pending,
                PaymentStatus::Success | PaymentStatus::Failed | PaymentStatus::Cancelled
            ) | (PaymentStatus::Success, PaymentStatus::Refunded)
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    OnlinePayment,
    Razorpay,
    LocalCash,
    BankTransfer,
    Upi,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Advance,
    Full,
    Remaining,
}

/// One settlement event against a worker's earnings, online or cash.
///
/// The gateway columns are populated only on the online path; the cash
/// columns only on the cash path. `amount` is in paise.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub job_id: Uuid,
    pub application_id: Option<Uuid>,

    pub transaction_id: String,
    pub order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub receipt_number: String,

    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,

    pub description: Option<String>,
    pub cash_collected_by: Option<String>,
    pub cash_collection_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_resolves_to_success_failed_or_cancelled() {
        assert!(PaymentStatus::Pending.can_transition(PaymentStatus::Success));
        assert!(PaymentStatus::Pending.can_transition(PaymentStatus::Failed));
        assert!(PaymentStatus::Pending.can_transition(PaymentStatus::Cancelled));
        assert!(!PaymentStatus::Pending.can_transition(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Pending.can_transition(PaymentStatus::Pending));
    }

    #[test]
    fn only_success_can_be_refunded() {
        assert!(PaymentStatus::Success.can_transition(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Failed.can_transition(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Cancelled.can_transition(PaymentStatus::Refunded));
    }

    #[test]
    fn completed_payment_cannot_complete_again() {
        // Double-completion of an online payment must be rejected.
        assert!(!PaymentStatus::Success.can_transition(PaymentStatus::Success));
        assert!(!PaymentStatus::Refunded.can_transition(PaymentStatus::Success));
    }
}
