pub mod notificationmodel;
pub mod paymentmodel;
pub mod reviewmodel;
pub mod usermodel;
pub mod wagemodel;
