pub mod api;
pub mod backend_factory;
pub mod config;
pub mod error;
pub mod telemetry;
