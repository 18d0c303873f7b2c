//! Loader contract and delivery-mode loaders.
//!
//! A [`Loader`] answers one rendering request at a time over an immutable
//! [`MasterPlaylist`] snapshot. Master playlist rendering and segment fetches
//! are shared by every mode (see [`default`]); the variants differ only in how
//! a media playlist is rendered:
//!
//! - [`VodLoader`] - the full static sequence
//! - [`LiveLoader`] - a sliding window that follows the live edge
//! - [`ChaseLoader`] - a window anchored at the first segment, growing with the live edge

mod chase;
mod clock;
pub mod default;
mod live;
pub mod vod;
pub mod window;

pub use chase::ChaseLoader;
pub use clock::{Clock, ManualClock, SystemClock};
pub use live::LiveLoader;
pub use vod::VodLoader;

use std::sync::Arc;

use bytes::Bytes;
use hlshost_core::{DeliveryMode, Error, Result};

use crate::hls::{MasterPlaylist, MediaPlaylist};

/// Rendering capability over a parsed playlist tree.
///
/// Indices are zero-based positions in parser order. An index outside the
/// current snapshot yields [`Error::NotFound`].
pub trait Loader: Send + Sync {
    /// Delivery mode this loader renders.
    fn mode(&self) -> DeliveryMode;

    /// The tree this loader currently renders from.
    fn snapshot(&self) -> Arc<MasterPlaylist>;

    fn load_master_playlist(&self) -> Result<Bytes> {
        Ok(default::render_master_playlist(&self.snapshot()))
    }

    fn load_media_playlist(&self, index: usize) -> Result<Bytes>;

    fn load_segment(&self, media_index: usize, segment_index: usize) -> Result<Bytes> {
        default::read_segment(&self.snapshot(), media_index, segment_index)
    }
}

/// Look up a media playlist or fail with [`Error::NotFound`].
pub(crate) fn media_playlist(master: &MasterPlaylist, index: usize) -> Result<&MediaPlaylist> {
    master
        .media_playlist(index)
        .ok_or_else(|| Error::not_found("media playlist", index))
}
