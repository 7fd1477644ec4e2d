pub mod db;
pub mod notificationdb;
pub mod paymentdb;
pub mod reviewdb;
pub mod userdb;
pub mod wagedb;
