//! Application assembly: configuration, lifecycle errors, orchestration.

mod config;
mod error;
mod orchestrator;

pub use config::{AppConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use error::AppError;
pub use orchestrator::CultureLens;
