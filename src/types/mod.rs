pub mod config;
pub mod handle;
pub mod lifecycle;
pub mod playback_state;
pub mod session;
pub mod video_item;
