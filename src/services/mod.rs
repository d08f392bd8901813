pub mod api_client;
pub mod csv_export;
pub mod dashboard;
pub mod event_store;
pub mod otp_controller;
pub mod session;
