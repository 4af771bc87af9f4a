mod app;
mod config;
mod format;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use format::FormatError;
