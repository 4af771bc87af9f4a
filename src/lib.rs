//! Core library for the `chronomap` timeline engine.
//!
//! This crate filters geotagged, timestamped records down to the subset
//! observable "as of" a moving point in time and drives the playback
//! controller that advances that point. It provides the two time-aware
//! record parsers (a GeoJSON-shaped feature format and a GeoRSS-shaped feed
//! format), the time-window value types, and the slider-driven playback
//! state machine with its cancellable animation loop. Map rendering,
//! clustering, and widget mechanics are external collaborators reached
//! through the [`playback::RenderSink`] seam.
pub mod config;
pub mod error;
pub mod formats;
pub mod geometry;
pub mod logger;
pub mod playback;
pub mod record;
pub mod time;

pub use record::Record;
pub use time::Timestamp;
