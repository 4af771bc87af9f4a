//! The playback controller: slider-to-time mapping, re-filtering, and the
//! animation loop.
mod player;
mod ticker;
mod timeline;


pub use player::Player;
pub use ticker::Ticker;
pub use timeline::{
    ChannelSink, DatasetMeta, PlaybackPhase, RenderSink, SLIDER_MAX, TickOutcome, Timeline,
};
