//! Reloadable playlist tree.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hlshost_core::Result;
use parking_lot::{Mutex, RwLock};

use crate::hls::MasterPlaylist;
use crate::parser::Parser;

/// Holds the current parsed tree and swaps it whole on reload.
///
/// Readers take an `Arc` snapshot and never observe a partially rebuilt tree.
#[derive(Debug)]
pub struct PlaylistStore {
    master_path: PathBuf,
    parser: Parser,
    current: RwLock<Arc<MasterPlaylist>>,
    generation: AtomicU64,
    /// Held across parse and swap so overlapping reloads publish in order.
    reloading: Mutex<()>,
}

impl PlaylistStore {
    /// Parse the tree at `master_path` and publish it.
    pub fn open(master_path: impl Into<PathBuf>, parser: Parser) -> Result<Self> {
        let master_path = master_path.into();
        let playlist = parser.parse(&master_path)?;
        Ok(Self::from_playlist(master_path, parser, playlist))
    }

    /// Publish an already parsed tree.
    pub fn from_playlist(
        master_path: impl Into<PathBuf>,
        parser: Parser,
        playlist: MasterPlaylist,
    ) -> Self {
        Self {
            master_path: master_path.into(),
            parser,
            current: RwLock::new(Arc::new(playlist)),
            generation: AtomicU64::new(0),
            reloading: Mutex::new(()),
        }
    }

    pub fn master_path(&self) -> &Path {
        &self.master_path
    }

    pub fn snapshot(&self) -> Arc<MasterPlaylist> {
        self.current.read().clone()
    }

    /// Re-parse the tree and publish the result.
    ///
    /// On failure the previous tree stays published. Concurrent calls run
    /// one at a time.
    pub fn reload(&self) -> Result<Arc<MasterPlaylist>> {
        let _reloading = self.reloading.lock();
        let playlist = match self.parser.parse(&self.master_path) {
            Ok(playlist) => Arc::new(playlist),
            Err(e) => {
                tracing::warn!(
                    path = %self.master_path.display(),
                    error = %e,
                    "Playlist reload failed, keeping previous tree"
                );
                return Err(e);
            }
        };

        *self.current.write() = Arc::clone(&playlist);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            path = %self.master_path.display(),
            generation,
            media_playlists = playlist.media_playlists.len(),
            "Playlist tree reloaded"
        );

        Ok(playlist)
    }

    /// Number of successful reloads since the store was created.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
