//! hlshost-core: shared errors, configuration, and media-domain enums.
//!
//! This crate is the foundational dependency for the other hlshost crates,
//! providing a unified error type, container-format classification with the
//! boundary MIME lookup, delivery modes, and application configuration.

pub mod config;
pub mod error;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use media::*;
