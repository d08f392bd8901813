pub mod api;
pub mod dashboard;
pub mod event;
pub mod loose;
pub mod otp;
pub mod participant;
pub mod user;
