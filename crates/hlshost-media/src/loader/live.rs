use std::sync::Arc;

use bytes::Bytes;
use hlshost_core::{DeliveryMode, Result};

use super::window::{render_window, Window};
use super::{media_playlist, Clock, Loader};
use crate::hls::MasterPlaylist;
use crate::store::PlaylistStore;

/// Sliding-window live playlists that follow the clock.
pub struct LiveLoader {
    store: Arc<PlaylistStore>,
    clock: Arc<dyn Clock>,
    window_segments: usize,
}

impl LiveLoader {
    pub fn new(store: Arc<PlaylistStore>, clock: Arc<dyn Clock>, window_segments: usize) -> Self {
        Self {
            store,
            clock,
            window_segments: window_segments.max(1),
        }
    }
}

impl Loader for LiveLoader {
    fn mode(&self) -> DeliveryMode {
        DeliveryMode::Live
    }

    fn snapshot(&self) -> Arc<MasterPlaylist> {
        self.store.snapshot()
    }

    fn load_media_playlist(&self, index: usize) -> Result<Bytes> {
        let master = self.snapshot();
        let media = media_playlist(&master, index)?;
        let elapsed_ms = self.clock.elapsed().as_secs_f64() * 1000.0;
        let window = Window::live(media, elapsed_ms, self.window_segments);
        tracing::debug!(
            index,
            first = window.first,
            end = window.end,
            ended = window.ended,
            "Live window"
        );
        Ok(render_window(media, &window))
    }
}
