// db/wagedb.rs
use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::error::HttpError;
use crate::models::wagemodel::{WagePeriodType, WageRecord, WageStatus, WageSummary, WageType};
use crate::service::ledger::{self, LedgerError, LedgerState, OverpaymentPolicy};

const WAGE_COLUMNS: &str = r#"
    id, worker_id, employer_id, job_id,
    work_date, hours_worked, days_worked, wage_type, rate_per_day, rate_per_hour,
    total_earned, total_paid, remaining_balance, status,
    period_type, period_start, period_end,
    description, notes, created_at, updated_at
"#;

#[derive(Error, Debug)]
pub enum WageApplyError {
    #[error("Wage record not found")]
    WageRecordNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Payment is no longer pending")]
    PaymentNotPending,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<WageApplyError> for HttpError {
    fn from(error: WageApplyError) -> Self {
        match error {
            WageApplyError::WageRecordNotFound | WageApplyError::PaymentNotFound => {
                HttpError::not_found(error.to_string())
            }
            WageApplyError::PaymentNotPending | WageApplyError::Ledger(_) => {
                HttpError::bad_request(error.to_string())
            }
            WageApplyError::Database(_) => {
                HttpError::new(error.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewWageRecord {
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
    pub period_type: WagePeriodType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
}

#[async_trait]
pub trait WageRecordExt {
    async fn create_wage_record(&self, new: NewWageRecord) -> Result<WageRecord, sqlx::Error>;

    async fn get_wage_record(&self, id: Uuid) -> Result<Option<WageRecord>, sqlx::Error>;

    async fn get_worker_wage_records(&self, worker_id: Uuid)
        -> Result<Vec<WageRecord>, sqlx::Error>;

    async fn get_employer_wage_records(
        &self,
        employer_id: Uuid,
    ) -> Result<Vec<WageRecord>, sqlx::Error>;

    /// Apply a settled payment to one wage record inside a transaction,
    /// reconciling balance and status before the write. The row is locked
    /// for the duration so two settlements cannot lose each other's update.
    async fn apply_payment_to_wage_record(
        &self,
        wage_record_id: Uuid,
        payment_id: Uuid,
        amount: i64,
        policy: OverpaymentPolicy,
    ) -> Result<WageRecord, WageApplyError>;

    /// Ids of the payments applied against a record, in application order.
    async fn get_wage_record_payment_ids(
        &self,
        wage_record_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error>;

    async fn get_worker_wage_summary(&self, worker_id: Uuid)
        -> Result<WageSummary, sqlx::Error>;
}

/// Locate the most recent wage record still open for settlement for a
/// worker/job pair. Heuristic linkage kept from the original product; the
/// caller may bypass it with an explicit wage record id.
pub(crate) async fn find_open_wage_record(
    conn: &mut sqlx::PgConnection,
    worker_id: Uuid,
    job_id: Uuid,
) -> Result<Option<WageRecord>, sqlx::Error> {
    sqlx::query_as::<_, WageRecord>(&format!(
        r#"
        SELECT {WAGE_COLUMNS}
        FROM wage_records
        WHERE worker_id = $1
          AND job_id = $2
          AND status IN ('pending'::wage_status, 'partially_paid'::wage_status)
        ORDER BY created_at DESC
        LIMIT 1
        FOR UPDATE
        "#
    ))
    .bind(worker_id)
    .bind(job_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Reconcile one payment into a locked wage record row and append the
/// payment to the record's ordered payment list. Runs inside the caller's
/// transaction.
pub(crate) async fn apply_payment_tx(
    conn: &mut sqlx::PgConnection,
    record: &WageRecord,
    payment_id: Uuid,
    amount: i64,
    policy: OverpaymentPolicy,
) -> Result<WageRecord, WageApplyError> {
    let mut state = LedgerState::from(record);
    ledger::record_payment(&mut state, amount, policy)?;
    persist_ledger_state(conn, record.id, payment_id, state).await
}

/// Write an already-reconciled ledger state back to the wage record row
/// and record the payment in the ordered join table.
pub(crate) async fn persist_ledger_state(
    conn: &mut sqlx::PgConnection,
    record_id: Uuid,
    payment_id: Uuid,
    state: LedgerState,
) -> Result<WageRecord, WageApplyError> {
    let updated = sqlx::query_as::<_, WageRecord>(&format!(
        r#"
        UPDATE wage_records
        SET total_paid = $2,
            remaining_balance = $3,
            status = $4::wage_status,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {WAGE_COLUMNS}
        "#
    ))
    .bind(record_id)
    .bind(state.total_paid)
    .bind(state.remaining_balance)
    .bind(state.status.to_str())
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO wage_record_payments (wage_record_id, payment_id, position)
        VALUES (
            $1, $2,
            COALESCE((SELECT MAX(position) + 1 FROM wage_record_payments WHERE wage_record_id = $1), 0)
        )
        "#,
    )
    .bind(record_id)
    .bind(payment_id)
    .execute(&mut *conn)
    .await?;

    Ok(updated)
}

#[async_trait]
impl WageRecordExt for DBClient {
    async fn create_wage_record(&self, new: NewWageRecord) -> Result<WageRecord, sqlx::Error> {
        let (remaining_balance, status) = ledger::reconcile(new.total_earned, 0);

        sqlx::query_as::<_, WageRecord>(&format!(
            r#"
            INSERT INTO wage_records (
                worker_id, employer_id, job_id,
                work_date, hours_worked, days_worked, wage_type, rate_per_day, rate_per_hour,
                total_earned, total_paid, remaining_balance, status,
                period_type, period_start, period_end, description, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, $11, $12::wage_status, $13, $14, $15, $16, $17)
            RETURNING {WAGE_COLUMNS}
            "#
        ))
        .bind(new.worker_id)
        .bind(new.employer_id)
        .bind(new.job_id)
        .bind(new.work_date)
        .bind(new.hours_worked)
        .bind(new.days_worked)
        .bind(new.wage_type)
        .bind(new.rate_per_day)
        .bind(new.rate_per_hour)
        .bind(new.total_earned)
        .bind(remaining_balance)
        .bind(status.to_str())
        .bind(new.period_type)
        .bind(new.period_start)
        .bind(new.period_end)
        .bind(new.description)
        .bind(new.notes)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_wage_record(&self, id: Uuid) -> Result<Option<WageRecord>, sqlx::Error> {
        sqlx::query_as::<_, WageRecord>(&format!(
            "SELECT {WAGE_COLUMNS} FROM wage_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_worker_wage_records(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<WageRecord>, sqlx::Error> {
        sqlx::query_as::<_, WageRecord>(&format!(
            r#"
            SELECT {WAGE_COLUMNS}
            FROM wage_records
            WHERE worker_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_employer_wage_records(
        &self,
        employer_id: Uuid,
    ) -> Result<Vec<WageRecord>, sqlx::Error> {
        sqlx::query_as::<_, WageRecord>(&format!(
            r#"
            SELECT {WAGE_COLUMNS}
            FROM wage_records
            WHERE employer_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn apply_payment_to_wage_record(
        &self,
        wage_record_id: Uuid,
        payment_id: Uuid,
        amount: i64,
        policy: OverpaymentPolicy,
    ) -> Result<WageRecord, WageApplyError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM payments WHERE id = $1")
            .bind(payment_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(WageApplyError::PaymentNotFound)?;

        let record = sqlx::query_as::<_, WageRecord>(&format!(
            "SELECT {WAGE_COLUMNS} FROM wage_records WHERE id = $1 FOR UPDATE"
        ))
        .bind(wage_record_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WageApplyError::WageRecordNotFound)?;

        let updated = apply_payment_tx(&mut *tx, &record, payment_id, amount, policy).await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn get_wage_record_payment_ids(
        &self,
        wage_record_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT payment_id
            FROM wage_record_payments
            WHERE wage_record_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(wage_record_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn get_worker_wage_summary(
        &self,
        worker_id: Uuid,
    ) -> Result<WageSummary, sqlx::Error> {
        let records = self.get_worker_wage_records(worker_id).await?;
        Ok(summarize(&records))
    }
}

/// Fold wage records into the aggregate totals the summary endpoints serve.
/// A full scan recomputed on demand, matching the observed product.
pub fn summarize(records: &[WageRecord]) -> WageSummary {
    let mut summary = WageSummary::default();
    for record in records {
        summary.total_earned += record.total_earned;
        summary.total_paid += record.total_paid;
        summary.total_remaining += record.remaining_balance;
        match record.status {
            WageStatus::Pending => summary.pending_records += 1,
            WageStatus::PartiallyPaid => summary.partially_paid_records += 1,
            WageStatus::FullyPaid => summary.fully_paid_records += 1,
            WageStatus::Overdue => {}
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(earned: i64, paid: i64) -> WageRecord {
        let (remaining, status) = ledger::reconcile(earned, paid);
        let now = Utc::now();
        WageRecord {
            id: Uuid::new_v4(),
            worker_id: Uuid::new_v4(),
            employer_id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            work_date: now.date_naive(),
            hours_worked: 0.0,
            days_worked: 1,
            wage_type: WageType::Daily,
            rate_per_day: earned,
            rate_per_hour: 0,
            total_earned: earned,
            total_paid: paid,
            remaining_balance: remaining,
            status,
            period_type: WagePeriodType::Daily,
            period_start: now.date_naive(),
            period_end: now.date_naive(),
            description: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn summary_folds_totals_and_status_counts() {
        let records = vec![record(100_000, 0), record(50_000, 20_000), record(30_000, 30_000)];
        let summary = summarize(&records);
        assert_eq!(summary.total_earned, 180_000);
        assert_eq!(summary.total_paid, 50_000);
        assert_eq!(summary.total_remaining, 130_000);
        assert_eq!(summary.pending_records, 1);
        assert_eq!(summary.partially_paid_records, 1);
        assert_eq!(summary.fully_paid_records, 1);
    }

    #[test]
    fn empty_summary_is_all_zero() {
        assert_eq!(summarize(&[]), WageSummary::default());
    }

    #[test]
    fn missing_payment_maps_to_not_found() {
        // Applying a nonexistent payment id must surface as 404, not as a
        // foreign key violation turned 500.
        let err: HttpError = WageApplyError::PaymentNotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Payment not found");
    }

    #[test]
    fn replayed_completion_maps_to_bad_request() {
        // A completion that raced past the handler's pre-check reports the
        // payment's state, not a missing wage record.
        let err: HttpError = WageApplyError::PaymentNotPending.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Payment is no longer pending");
    }

    #[test]
    fn missing_wage_record_maps_to_not_found() {
        let err: HttpError = WageApplyError::WageRecordNotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Wage record not found");
    }
}
