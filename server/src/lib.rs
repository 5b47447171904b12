/// Basic application code
pub mod app;
/// Administrative authorization
pub mod auth;
/// Controllers for REST endpoints
pub mod controller;
/// Error enums
pub mod error;
/// Best-effort email notifications
pub mod notify;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
