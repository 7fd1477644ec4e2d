// db/paymentdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use super::wagedb::{self, WageApplyError};
use crate::models::paymentmodel::{Payment, PaymentMethod, PaymentType};
use crate::models::wagemodel::WageRecord;
use crate::service::gateway::GatewayConfirmation;
use crate::service::ledger::{self, LedgerState, OverpaymentPolicy, SettlementOutcome};
use crate::utils::reference;

const PAYMENT_COLUMNS: &str = r#"
    id, worker_id, employer_id, job_id, application_id,
    transaction_id, order_id, gateway_payment_id, gateway_signature, receipt_number,
    amount, currency, status, payment_method, payment_type,
    description, cash_collected_by, cash_collection_date, notes,
    created_at, updated_at
"#;

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub job_id: Uuid,
    pub application_id: Option<Uuid>,
    pub amount: i64,
    pub payment_type: PaymentType,
    pub description: Option<String>,
}

/// Result of settling a payment: the updated payment row plus the wage
/// record the amount was applied to, when one matched.
#[derive(Debug)]
pub struct Settlement {
    pub payment: Payment,
    pub wage_record: Option<WageRecord>,
}

#[async_trait]
pub trait PaymentExt {
    /// Insert a pending online payment carrying the gateway order id.
    async fn create_online_payment(
        &self,
        new: NewPayment,
        order_id: String,
    ) -> Result<Payment, sqlx::Error>;

    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>, sqlx::Error>;

    async fn get_payment_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error>;

    async fn get_employer_payments(&self, employer_id: Uuid)
        -> Result<Vec<Payment>, sqlx::Error>;

    async fn get_worker_payments(&self, worker_id: Uuid) -> Result<Vec<Payment>, sqlx::Error>;

    /// Mark a pending online payment successful and apply it to the ledger
    /// in one transaction. The status guard is repeated in SQL so a second
    /// completion of the same order cannot double-apply.
    async fn settle_online_payment(
        &self,
        payment_id: Uuid,
        confirmation: GatewayConfirmation,
        payment_method: PaymentMethod,
        wage_record_id: Option<Uuid>,
        policy: OverpaymentPolicy,
    ) -> Result<Settlement, WageApplyError>;

    /// Insert a cash payment, immediately successful, and apply it to the
    /// ledger in the same transaction.
    async fn create_cash_payment(
        &self,
        new: NewPayment,
        cash_collected_by: String,
        notes: Option<String>,
        wage_record_id: Option<Uuid>,
        policy: OverpaymentPolicy,
    ) -> Result<Settlement, WageApplyError>;
}

async fn settle_against_wage_record(
    conn: &mut sqlx::PgConnection,
    payment: &Payment,
    wage_record_id: Option<Uuid>,
    policy: OverpaymentPolicy,
) -> Result<Option<WageRecord>, WageApplyError> {
    let record = match wage_record_id {
        Some(id) => {
            let record = sqlx::query_as::<_, WageRecord>(
                r#"
                SELECT id, worker_id, employer_id, job_id,
                    work_date, hours_worked, days_worked, wage_type, rate_per_day, rate_per_hour,
                    total_earned, total_paid, remaining_balance, status,
                    period_type, period_start, period_end,
                    description, notes, created_at, updated_at
                FROM wage_records WHERE id = $1 FOR UPDATE
                "#,
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(WageApplyError::WageRecordNotFound)?;
            Some(record)
        }
        None => wagedb::find_open_wage_record(conn, payment.worker_id, payment.job_id).await?,
    };

    let outcome = ledger::apply_settlement(
        record.as_ref().map(LedgerState::from),
        payment.amount,
        policy,
    )?;

    match outcome {
        SettlementOutcome::Applied(state) => {
            let record = record.ok_or(WageApplyError::WageRecordNotFound)?;
            let updated =
                wagedb::persist_ledger_state(conn, record.id, payment.id, state).await?;
            Ok(Some(updated))
        }
        SettlementOutcome::Unlinked => {
            // The payment stands as settled with no ledger linkage. The
            // original product diverged here silently; we at least say so.
            tracing::warn!(
                payment_id = %payment.id,
                worker_id = %payment.worker_id,
                job_id = %payment.job_id,
                "settled payment has no open wage record to apply against"
            );
            Ok(None)
        }
    }
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn create_online_payment(
        &self,
        new: NewPayment,
        order_id: String,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (
                worker_id, employer_id, job_id, application_id,
                transaction_id, order_id, receipt_number,
                amount, status, payment_method, payment_type, description
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8,
                'pending'::payment_status, 'online_payment'::payment_method, $9, $10
            )
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(new.worker_id)
        .bind(new.employer_id)
        .bind(new.job_id)
        .bind(new.application_id)
        .bind(reference::transaction_id())
        .bind(order_id)
        .bind(reference::receipt_number())
        .bind(new.amount)
        .bind(new.payment_type)
        .bind(new.description)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_payment_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_employer_payments(
        &self,
        employer_id: Uuid,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            WHERE employer_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_worker_payments(&self, worker_id: Uuid) -> Result<Vec<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            WHERE worker_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn settle_online_payment(
        &self,
        payment_id: Uuid,
        confirmation: GatewayConfirmation,
        payment_method: PaymentMethod,
        wage_record_id: Option<Uuid>,
        policy: OverpaymentPolicy,
    ) -> Result<Settlement, WageApplyError> {
        let mut tx = self.pool.begin().await?;

        // `status = 'pending'` in the WHERE clause makes a replayed
        // completion come back empty instead of double-applying.
        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments
            SET gateway_payment_id = $2,
                gateway_signature = $3,
                status = 'success'::payment_status,
                payment_method = $4,
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'::payment_status
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payment_id)
        .bind(confirmation.gateway_payment_id)
        .bind(confirmation.gateway_signature)
        .bind(payment_method)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WageApplyError::PaymentNotPending)?;

        let wage_record =
            settle_against_wage_record(&mut *tx, &payment, wage_record_id, policy).await?;

        tx.commit().await?;
        Ok(Settlement {
            payment,
            wage_record,
        })
    }

    async fn create_cash_payment(
        &self,
        new: NewPayment,
        cash_collected_by: String,
        notes: Option<String>,
        wage_record_id: Option<Uuid>,
        policy: OverpaymentPolicy,
    ) -> Result<Settlement, WageApplyError> {
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (
                worker_id, employer_id, job_id, application_id,
                transaction_id, receipt_number, amount,
                status, payment_method, payment_type,
                description, cash_collected_by, cash_collection_date, notes
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                'success'::payment_status, 'local_cash'::payment_method, $8,
                $9, $10, NOW(), $11
            )
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(new.worker_id)
        .bind(new.employer_id)
        .bind(new.job_id)
        .bind(new.application_id)
        .bind(reference::cash_transaction_id())
        .bind(reference::receipt_number())
        .bind(new.amount)
        .bind(new.payment_type)
        .bind(new.description)
        .bind(cash_collected_by)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        let wage_record =
            settle_against_wage_record(&mut *tx, &payment, wage_record_id, policy).await?;

        tx.commit().await?;
        Ok(Settlement {
            payment,
            wage_record,
        })
    }
}
