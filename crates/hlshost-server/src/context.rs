//! Application context shared across route handlers via Axum state.

use std::collections::HashMap;
use std::sync::Arc;

use hlshost_core::config::Config;
use hlshost_core::{DeliveryMode, Error, Result};
use hlshost_media::{ChaseLoader, Clock, LiveLoader, Loader, PlaylistStore, VodLoader};

/// Central state handed to every handler.
///
/// Cheap to clone; all fields are behind `Arc`.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<PlaylistStore>,
    pub loaders: Arc<HashMap<DeliveryMode, Arc<dyn Loader>>>,
}

impl AppContext {
    /// Build one loader per configured delivery mode.
    ///
    /// The Vod loader captures the store's current snapshot; Live and Chase
    /// follow the store across reloads and share `clock`.
    pub fn new(config: Config, store: Arc<PlaylistStore>, clock: Arc<dyn Clock>) -> Self {
        let mut loaders: HashMap<DeliveryMode, Arc<dyn Loader>> = HashMap::new();

        for &mode in &config.modes {
            let loader: Arc<dyn Loader> = match mode {
                DeliveryMode::Vod => Arc::new(VodLoader::new(store.snapshot())),
                DeliveryMode::Live => Arc::new(LiveLoader::new(
                    Arc::clone(&store),
                    Arc::clone(&clock),
                    config.live.window_segments,
                )),
                DeliveryMode::Chase => {
                    Arc::new(ChaseLoader::new(Arc::clone(&store), Arc::clone(&clock)))
                }
            };
            loaders.insert(mode, loader);
        }

        tracing::debug!(modes = ?loaders.keys().collect::<Vec<_>>(), "Loaders ready");

        Self {
            config: Arc::new(config),
            store,
            loaders: Arc::new(loaders),
        }
    }

    /// Loader for `mode`, or [`Error::NotFound`] when the mode is not served.
    pub fn loader(&self, mode: DeliveryMode) -> Result<Arc<dyn Loader>> {
        self.loaders
            .get(&mode)
            .cloned()
            .ok_or_else(|| Error::not_found("delivery mode", mode))
    }
}
