//! Configuration loading and application.
mod apply;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::apply_config;
pub use loader::load_config;
pub use types::{ConfigFile, FormatKind, FormatOptionsConfig, TimelineOptions};

#[cfg(test)]
pub(crate) use loader::load_config_file;
