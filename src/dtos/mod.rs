pub mod notificationdtos;
pub mod paymentdtos;
pub mod reviewdtos;
pub mod userdtos;
pub mod wagedtos;
