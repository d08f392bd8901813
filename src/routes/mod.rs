pub mod auth;
pub mod auth_otp_routes;
pub mod dashboard;
pub mod events;
pub mod registration;
