pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod scoring;
pub mod session;
pub mod telemetry;
