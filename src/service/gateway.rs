//! Payment gateway capability.
//!
//! The settlement flow only ever talks to the [`PaymentGateway`] trait. The
//! shipped implementation is [`MockGateway`], which synthesizes its own
//! order ids and confirmation identifiers without contacting any provider;
//! a real integration plugs in behind the same seam.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::utils::reference;

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayConfirmation {
    pub gateway_payment_id: String,
    pub gateway_signature: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open an order for the given amount in paise.
    async fn create_order(&self, amount: i64) -> Result<GatewayOrder, String>;

    /// Confirm an order. The mock accepts unconditionally; a real gateway
    /// would verify the order against the provider here.
    async fn confirm(&self, order_id: &str) -> Result<GatewayConfirmation, String>;
}

/// Gateway stand-in that self-issues confirmations.
#[derive(Debug, Default, Clone)]
pub struct MockGateway;

fn random_signature() -> String {
    let mut rng = rand::rng();
    (0..32)
        .map(|_| format!("{:02x}", rng.random_range(0..=255u8)))
        .collect()
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(&self, amount: i64) -> Result<GatewayOrder, String> {
        Ok(GatewayOrder {
            order_id: reference::order_id(),
            amount,
            currency: "INR".to_string(),
        })
    }

    async fn confirm(&self, _order_id: &str) -> Result<GatewayConfirmation, String> {
        Ok(GatewayConfirmation {
            gateway_payment_id: reference::gateway_payment_id(),
            gateway_signature: random_signature(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_gateway_issues_prefixed_identifiers() {
        let gateway = MockGateway;
        let order = gateway.create_order(50_000).await.unwrap();
        assert!(order.order_id.starts_with("ORDER"));
        assert_eq!(order.amount, 50_000);
        assert_eq!(order.currency, "INR");

        let confirmation = gateway.confirm(&order.order_id).await.unwrap();
        assert!(confirmation.gateway_payment_id.starts_with("PAY"));
        assert_eq!(confirmation.gateway_signature.len(), 64);
    }
}
