use tempfile::tempdir;

use super::types::{DEFAULT_TIME_DELTA, FormatKind, TimelineOptions};
use super::{apply_config, load_config_file};
use crate::error::{AppError, ConfigError};

#[test]
fn parse_toml_config_with_aliases() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("chronomap.toml");
    let content = r#"
dateKey = "pubDate"
nameKey = "title"
cumulative = false
timeDelta = 3600
speeds = ["Slow", "Normal", "Fast"]
format = "geo-rss"

[formatOptions]
featureTitle = "Unnamed"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.date_key.as_deref() != Some("pubDate") {
        return Err("Unexpected date_key".to_owned());
    }
    if config.time_delta != Some(3600) {
        return Err("Unexpected time_delta".to_owned());
    }
    if config.format != Some(FormatKind::GeoRss) {
        return Err("Unexpected format".to_owned());
    }
    let format_options = match config.format_options {
        Some(format_options) => format_options,
        None => return Err("Expected formatOptions".to_owned()),
    };
    if format_options.feature_title.as_deref() != Some("Unnamed") {
        return Err("Unexpected featureTitle".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config_with_snake_case_keys() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("chronomap.json");
    let content = r#"{"date_key": "when", "cumulative": true, "time_delta": 60}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.date_key.as_deref() != Some("when") {
        return Err("Unexpected date_key".to_owned());
    }
    if config.cumulative != Some(true) {
        return Err("Unexpected cumulative".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("chronomap.yaml");
    std::fs::write(&path, "date_key: when").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected an error".to_owned()),
    }
}

#[test]
fn apply_merges_onto_defaults() -> Result<(), String> {
    let mut options = TimelineOptions::default();
    if options.time_delta != DEFAULT_TIME_DELTA || !options.cumulative {
        return Err("Unexpected defaults".to_owned());
    }
    let config = toml::from_str(
        r#"
cumulative = false
speeds = ["One"]
"#,
    )
    .map_err(|err| format!("parse failed: {}", err))?;
    apply_config(&mut options, config).map_err(|err| format!("apply failed: {}", err))?;
    if options.cumulative {
        return Err("Expected windowed mode".to_owned());
    }
    if options.speeds != vec!["One".to_owned()] {
        return Err("Unexpected speeds".to_owned());
    }
    // Untouched fields keep their defaults.
    if options.date_key != "when" {
        return Err("Unexpected date_key".to_owned());
    }
    Ok(())
}

#[test]
fn apply_rejects_empty_speeds() -> Result<(), String> {
    let mut options = TimelineOptions::default();
    let config = toml::from_str("speeds = []").map_err(|err| format!("parse failed: {}", err))?;
    match apply_config(&mut options, config) {
        Err(AppError::Config(ConfigError::EmptySpeeds)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(()) => Err("Expected an error".to_owned()),
    }
}

#[test]
fn apply_rejects_non_positive_time_delta() -> Result<(), String> {
    let mut options = TimelineOptions::default();
    let config = toml::from_str("time_delta = 0").map_err(|err| format!("parse failed: {}", err))?;
    match apply_config(&mut options, config) {
        Err(AppError::Config(ConfigError::NonPositiveTimeDelta { value: 0 })) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(()) => Err("Expected an error".to_owned()),
    }
}
