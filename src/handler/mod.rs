pub mod notification;
pub mod payment;
pub mod review;
pub mod users;
pub mod wage;
