pub mod auth;
pub mod auth_otp;
pub mod dashboard;
pub mod events;
pub mod registration;
