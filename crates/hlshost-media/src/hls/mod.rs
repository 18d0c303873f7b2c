//! HLS playlist model.
//!
//! The types here are plain data: they are built once by the
//! [`Parser`](crate::parser::Parser) and never mutated afterwards.

pub mod tags;
mod types;

pub use types::{MasterPlaylist, MediaPlaylist, Segment};
