//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which writes a small HLS tree into a temp
//! directory, parses it into a [`PlaylistStore`], and builds a full
//! [`AppContext`] driven by a [`ManualClock`]. The [`TestHarness::with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hlshost_core::config::Config;
use hlshost_media::{ManualClock, Parser, PlaylistStore};
use hlshost_server::context::AppContext;
use hlshost_server::router::build_router;
use tempfile::TempDir;

pub const MASTER: &str = "\
#EXTM3U
#EXT-X-VERSION:3
#EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=640x360
low/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2400000,RESOLUTION=1280x720
high/index.m3u8
";

/// Three 6 second segments plus a fourth after a discontinuity.
pub const MEDIA: &str = "\
#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:6
#EXT-X-MEDIA-SEQUENCE:0
#EXT-X-PLAYLIST-TYPE:VOD
#EXTINF:6.0,
seg0.ts
#EXTINF:6.0,
seg1.ts
#EXTINF:6.0,
seg2.ts
#EXT-X-DISCONTINUITY
#EXTINF:6.0,
seg3.ts
#EXT-X-ENDLIST
";

/// Write the fixture tree under `dir` and return the master playlist path.
pub fn write_fixture_tree(dir: &Path) -> PathBuf {
    fs::write(dir.join("playlist.m3u8"), MASTER).unwrap();
    for variant in ["low", "high"] {
        let variant_dir = dir.join(variant);
        fs::create_dir_all(&variant_dir).unwrap();
        fs::write(variant_dir.join("index.m3u8"), MEDIA).unwrap();
        for i in 0..4 {
            fs::write(
                variant_dir.join(format!("seg{i}.ts")),
                segment_bytes(variant, i),
            )
            .unwrap();
        }
    }
    dir.join("playlist.m3u8")
}

/// Contents of fixture segment `index` of `variant`.
pub fn segment_bytes(variant: &str, index: usize) -> Vec<u8> {
    format!("\x47{variant}-segment-{index}").into_bytes()
}

/// Test harness wrapping a fully-constructed [`AppContext`] over a fixture
/// tree in a temp directory.
pub struct TestHarness {
    pub dir: TempDir,
    pub ctx: AppContext,
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration. The master playlist
    /// path is always pointed at the fixture tree.
    pub fn with_config(mut config: Config) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let master = write_fixture_tree(dir.path());
        config.source.master_playlist = master.clone();

        let store = PlaylistStore::open(&master, Parser::new()).expect("failed to parse fixture");
        let clock = Arc::new(ManualClock::new());
        let ctx = AppContext::new(config, Arc::new(store), clock.clone());

        Self { dir, ctx, clock }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Path of a file inside the fixture tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}
