//! Wage ledger reconciliation.
//!
//! Earnings, partial payments and balances live on the wage record as
//! denormalized columns. Every mutation of `total_paid` goes through
//! [`record_payment`], which recomputes `remaining_balance` and `status`
//! before anything is persisted. Amounts are in paise.

use thiserror::Error;

use crate::models::wagemodel::{WageRecord, WageStatus, WageType};

#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("Payment amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Payment of {amount} exceeds remaining balance {remaining}")]
    Overpayment { amount: i64, remaining: i64 },
}

/// Whether a payment may push `total_paid` past `total_earned`.
///
/// The observed product behavior neither rejected nor clamped overpayment;
/// here it is a policy switch with `Reject` as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverpaymentPolicy {
    Reject,
    Allow,
}

/// The ledger columns of a wage record, detached from storage so the
/// reconciliation rule can be exercised without a database.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerState {
    pub total_earned: i64,
    pub total_paid: i64,
    pub remaining_balance: i64,
    pub status: WageStatus,
}

impl LedgerState {
    pub fn new(total_earned: i64) -> Self {
        let (remaining_balance, status) = reconcile(total_earned, 0);
        LedgerState {
            total_earned,
            total_paid: 0,
            remaining_balance,
            status,
        }
    }
}

impl From<&WageRecord> for LedgerState {
    fn from(record: &WageRecord) -> Self {
        LedgerState {
            total_earned: record.total_earned,
            total_paid: record.total_paid,
            remaining_balance: record.remaining_balance,
            status: record.status,
        }
    }
}

/// Earnings computed once at wage-record creation.
///
/// Daily: rate_per_day x days. Hourly: rate_per_hour x hours. For monthly
/// and project wages `rate_per_day` carries the whole amount.
pub fn total_earned(
    wage_type: WageType,
    rate_per_day: i64,
    rate_per_hour: i64,
    days_worked: i32,
    hours_worked: f64,
) -> i64 {
    match wage_type {
        WageType::Daily => rate_per_day * days_worked as i64,
        WageType::Hourly => (rate_per_hour as f64 * hours_worked).round() as i64,
        WageType::Monthly | WageType::Project => rate_per_day,
    }
}

/// Recompute remaining balance and status from the two paid/earned totals.
///
/// The boundary is inclusive on the fully-paid side: paying exactly the
/// earned total is `fully_paid`, never `partially_paid`. The balance is not
/// clamped, so an allowed overpayment leaves it negative.
pub fn reconcile(total_earned: i64, total_paid: i64) -> (i64, WageStatus) {
    let remaining = total_earned - total_paid;
    let status = if total_paid == 0 {
        WageStatus::Pending
    } else if total_paid < total_earned {
        WageStatus::PartiallyPaid
    } else {
        WageStatus::FullyPaid
    };
    (remaining, status)
}

/// Apply one settled payment to the ledger, reconciling in place.
pub fn record_payment(
    state: &mut LedgerState,
    amount: i64,
    policy: OverpaymentPolicy,
) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::NonPositiveAmount);
    }

    if policy == OverpaymentPolicy::Reject && state.total_paid + amount > state.total_earned {
        return Err(LedgerError::Overpayment {
            amount,
            remaining: state.remaining_balance,
        });
    }

    state.total_paid += amount;
    let (remaining, status) = reconcile(state.total_earned, state.total_paid);
    state.remaining_balance = remaining;
    state.status = status;
    Ok(())
}

/// What happened when a settled payment was matched against the ledger.
#[derive(Debug, PartialEq)]
pub enum SettlementOutcome {
    /// A wage record was found and its ledger columns were reconciled.
    Applied(LedgerState),
    /// No open wage record matched; the payment stands alone and no ledger
    /// is touched. Callers log this divergence.
    Unlinked,
}

/// Settle a payment against the most recent open wage record, if any.
pub fn apply_settlement(
    open_record: Option<LedgerState>,
    amount: i64,
    policy: OverpaymentPolicy,
) -> Result<SettlementOutcome, LedgerError> {
    match open_record {
        Some(mut state) => {
            record_payment(&mut state, amount, policy)?;
            Ok(SettlementOutcome::Applied(state))
        }
        None => Ok(SettlementOutcome::Unlinked),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ledger_is_pending_with_full_balance() {
        let state = LedgerState::new(1000);
        assert_eq!(state.total_paid, 0);
        assert_eq!(state.remaining_balance, 1000);
        assert_eq!(state.status, WageStatus::Pending);
    }

    #[test]
    fn partial_then_final_payment() {
        let mut state = LedgerState::new(1000);

        record_payment(&mut state, 400, OverpaymentPolicy::Reject).unwrap();
        assert_eq!(state.total_paid, 400);
        assert_eq!(state.remaining_balance, 600);
        assert_eq!(state.status, WageStatus::PartiallyPaid);

        record_payment(&mut state, 600, OverpaymentPolicy::Reject).unwrap();
        assert_eq!(state.total_paid, 1000);
        assert_eq!(state.remaining_balance, 0);
        assert_eq!(state.status, WageStatus::FullyPaid);
    }

    #[test]
    fn exact_payment_is_fully_paid_not_partial() {
        let (remaining, status) = reconcile(500, 500);
        assert_eq!(remaining, 0);
        assert_eq!(status, WageStatus::FullyPaid);
    }

    #[test]
    fn balance_always_equals_earned_minus_paid() {
        let mut state = LedgerState::new(7500);
        for amount in [100, 250, 3000, 4150] {
            record_payment(&mut state, amount, OverpaymentPolicy::Reject).unwrap();
            assert_eq!(state.remaining_balance, state.total_earned - state.total_paid);
        }
        assert_eq!(state.status, WageStatus::FullyPaid);
    }

    #[test]
    fn zero_or_negative_amount_is_rejected() {
        let mut state = LedgerState::new(1000);
        assert_eq!(
            record_payment(&mut state, 0, OverpaymentPolicy::Allow),
            Err(LedgerError::NonPositiveAmount)
        );
        assert_eq!(
            record_payment(&mut state, -50, OverpaymentPolicy::Allow),
            Err(LedgerError::NonPositiveAmount)
        );
        assert_eq!(state, LedgerState::new(1000));
    }

    #[test]
    fn overpayment_rejected_by_default_policy() {
        let mut state = LedgerState::new(1000);
        let err = record_payment(&mut state, 1200, OverpaymentPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Overpayment {
                amount: 1200,
                remaining: 1000
            }
        );
        assert_eq!(state.total_paid, 0);
    }

    #[test]
    fn overpayment_allowed_leaves_negative_balance() {
        let mut state = LedgerState::new(1000);
        record_payment(&mut state, 1200, OverpaymentPolicy::Allow).unwrap();
        assert_eq!(state.remaining_balance, -200);
        assert_eq!(state.status, WageStatus::FullyPaid);
    }

    #[test]
    fn total_earned_per_wage_type() {
        assert_eq!(total_earned(WageType::Daily, 50_000, 0, 6, 0.0), 300_000);
        assert_eq!(total_earned(WageType::Hourly, 0, 8_000, 0, 7.5), 60_000);
        // Monthly and project carry the whole amount in rate_per_day.
        assert_eq!(total_earned(WageType::Monthly, 1_500_000, 0, 26, 0.0), 1_500_000);
        assert_eq!(total_earned(WageType::Project, 800_000, 0, 0, 0.0), 800_000);
    }

    #[test]
    fn settlement_with_no_open_record_is_unlinked() {
        // A cash payment with no matching wage record persists as success
        // but must not invent a ledger entry.
        let outcome = apply_settlement(None, 50_000, OverpaymentPolicy::Reject).unwrap();
        assert_eq!(outcome, SettlementOutcome::Unlinked);
    }

    #[test]
    fn settlement_against_open_record_reconciles() {
        let outcome =
            apply_settlement(Some(LedgerState::new(100_000)), 40_000, OverpaymentPolicy::Reject)
                .unwrap();
        match outcome {
            SettlementOutcome::Applied(state) => {
                assert_eq!(state.remaining_balance, 60_000);
                assert_eq!(state.status, WageStatus::PartiallyPaid);
            }
            SettlementOutcome::Unlinked => panic!("expected an applied settlement"),
        }
    }
}
