use std::sync::Arc;

use bytes::Bytes;
use hlshost_core::{DeliveryMode, Result};

use super::window::{render_window, Window};
use super::{media_playlist, Clock, Loader};
use crate::hls::MasterPlaylist;
use crate::store::PlaylistStore;

/// Event playlists anchored at the first segment, so players can seek back to
/// the start while the live edge keeps growing.
pub struct ChaseLoader {
    store: Arc<PlaylistStore>,
    clock: Arc<dyn Clock>,
}

impl ChaseLoader {
    pub fn new(store: Arc<PlaylistStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl Loader for ChaseLoader {
    fn mode(&self) -> DeliveryMode {
        DeliveryMode::Chase
    }

    fn snapshot(&self) -> Arc<MasterPlaylist> {
        self.store.snapshot()
    }

    fn load_media_playlist(&self, index: usize) -> Result<Bytes> {
        let master = self.snapshot();
        let media = media_playlist(&master, index)?;
        let elapsed_ms = self.clock.elapsed().as_secs_f64() * 1000.0;
        let window = Window::chase(media, elapsed_ms);
        tracing::debug!(index, end = window.end, ended = window.ended, "Chase window");
        Ok(render_window(media, &window))
    }
}
