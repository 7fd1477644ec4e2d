//! Reference-id generation for transactions, receipts and gateway orders.
//!
//! Ids are a fixed prefix, the current unix-millis timestamp and a small
//! random suffix. Uniqueness is probabilistic, which matches how busy these
//! identifiers actually are.

use chrono::Utc;
use rand::Rng;

fn generate(prefix: &str) -> String {
    let suffix: u32 = rand::rng().random_range(0..1000);
    format!("{}{}{}", prefix, Utc::now().timestamp_millis(), suffix)
}

pub fn transaction_id() -> String {
    generate("TXN")
}

pub fn cash_transaction_id() -> String {
    generate("CASH")
}

pub fn order_id() -> String {
    generate("ORDER")
}

pub fn gateway_payment_id() -> String {
    generate("PAY")
}

pub fn receipt_number() -> String {
    generate("RCP")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_their_prefix() {
        assert!(transaction_id().starts_with("TXN"));
        assert!(cash_transaction_id().starts_with("CASH"));
        assert!(order_id().starts_with("ORDER"));
        assert!(gateway_payment_id().starts_with("PAY"));
        assert!(receipt_number().starts_with("RCP"));
    }

    #[test]
    fn id_body_is_numeric() {
        let id = transaction_id();
        let body = id.strip_prefix("TXN").unwrap();
        assert!(body.chars().all(|c| c.is_ascii_digit()));
        assert!(body.len() >= 13);
    }
}
