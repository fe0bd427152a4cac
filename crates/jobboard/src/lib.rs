pub mod config;
pub mod error;
pub mod moderation;
pub mod query;
pub mod telemetry;
pub mod workflows;
