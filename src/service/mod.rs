pub mod gateway;
pub mod ledger;
pub mod rating;
