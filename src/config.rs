// config.rs
use crate::service::ledger::OverpaymentPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    /// Whether a settlement may push total_paid past total_earned.
    pub overpayment_policy: OverpaymentPolicy,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");

        let overpayment_policy = match std::env::var("ALLOW_OVERPAYMENT").as_deref() {
            Ok("true") | Ok("1") => OverpaymentPolicy::Allow,
            _ => OverpaymentPolicy::Reject,
        };

        Config {
            database_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().unwrap(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8000),
            overpayment_policy,
        }
    }
}
