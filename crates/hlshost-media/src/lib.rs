//! hlshost-media: M3U8 playlist parsing and rewriting.
//!
//! This crate turns an on-disk HLS tree into an immutable in-memory model and
//! renders derived playlists whose references point back into the server's
//! numeric routing scheme.
//!
//! # Modules
//!
//! - [`hls`] - Playlist model (master, media, segment) and directive helpers
//! - [`parser`] - Recursive master/media playlist parser
//! - [`store`] - Atomically swappable snapshot of the parsed tree
//! - [`loader`] - The loader contract and its Vod, Live and Chase variants

pub mod hls;
pub mod loader;
pub mod parser;
pub mod store;

// Re-export commonly used items at the crate root.
pub use hls::{MasterPlaylist, MediaPlaylist, Segment};
pub use loader::{
    ChaseLoader, Clock, LiveLoader, Loader, ManualClock, SystemClock, VodLoader,
};
pub use parser::{FsReader, Parser, PlaylistReader};
pub use store::PlaylistStore;
