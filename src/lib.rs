//! Video session manager: an ordered list of picked videos, resolved to
//! display names, driving a single playback engine across host lifecycle
//! transitions.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod events;
pub mod ops;
pub mod session;
pub mod storage;
pub mod types;
