use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, TimelineOptions};

/// Merges a loaded config file onto the runtime options.
///
/// # Errors
///
/// Returns a [`ConfigError`] for an empty speeds list or a non-positive
/// trailing-window width.
pub fn apply_config(options: &mut TimelineOptions, config: ConfigFile) -> AppResult<()> {
    if let Some(date_key) = config.date_key {
        options.date_key = date_key;
    }
    if let Some(name_key) = config.name_key {
        options.name_key = Some(name_key);
    }
    if let Some(cumulative) = config.cumulative {
        options.cumulative = cumulative;
    }
    if let Some(time_delta) = config.time_delta {
        if time_delta <= 0 {
            return Err(AppError::config(ConfigError::NonPositiveTimeDelta {
                value: time_delta,
            }));
        }
        options.time_delta = time_delta;
    }
    if let Some(speeds) = config.speeds {
        if speeds.is_empty() {
            return Err(AppError::config(ConfigError::EmptySpeeds));
        }
        options.speeds = speeds;
    }
    if let Some(format) = config.format {
        options.format = format;
    }
    if let Some(format_options) = config.format_options {
        if let Some(feature_title) = format_options.feature_title {
            options.feature_title = Some(feature_title);
        }
        if let Some(feature_description) = format_options.feature_description {
            options.feature_description = Some(feature_description);
        }
    }
    Ok(())
}
