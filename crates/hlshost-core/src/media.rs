//! Media-domain enums: segment container formats and delivery modes.
//!
//! All enums serialize in lowercase (via `serde(rename_all = "lowercase")`) and
//! implement `Display` manually for consistent string representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Content type for every playlist response.
pub const PLAYLIST_MIME_TYPE: &str = "application/x-mpegURL";
/// Content type for MPEG-2 transport stream segments.
pub const MPEG2_TS_MIME_TYPE: &str = "video/MP2T";
/// Content type for fragmented MP4 segments.
pub const MP4_MIME_TYPE: &str = "video/mp4";

const TS_EXTENSION: &str = ".ts";
const MP4_EXTENSION: &str = ".mp4";
const M4_EXTENSION_PREFIX: &str = ".m4";
const MP4_EXTENSION_PREFIX: &str = ".mp4";
const CMF_EXTENSION_PREFIX: &str = ".cmf";

// ---------------------------------------------------------------------------
// ContainerFormat
// ---------------------------------------------------------------------------

/// Wrapping file format of a media segment, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    Ts,
    Fmp4,
}

impl ContainerFormat {
    /// Classify a segment name or URI by its suffix.
    ///
    /// Precedence: exact `.ts`; exact `.mp4`; `.m4` starting four characters
    /// from the end (`.m4s`, `.m4v`, ...); `.mp4` or `.cmf` starting five
    /// characters from the end (`.mp4f`, `.cmfv`, ...). Everything else is
    /// rejected with [`Error::UnsupportedContainer`].
    pub fn classify(name: &str) -> Result<Self> {
        if name.ends_with(TS_EXTENSION) {
            return Ok(Self::Ts);
        }
        if name.ends_with(MP4_EXTENSION) {
            return Ok(Self::Fmp4);
        }
        if tail_starts_with(name, 4, M4_EXTENSION_PREFIX)
            || tail_starts_with(name, 5, MP4_EXTENSION_PREFIX)
            || tail_starts_with(name, 5, CMF_EXTENSION_PREFIX)
        {
            return Ok(Self::Fmp4);
        }
        Err(Error::unsupported_container(name))
    }

    /// MIME type served for segments in this container.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Ts => MPEG2_TS_MIME_TYPE,
            Self::Fmp4 => MP4_MIME_TYPE,
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ts => write!(f, "ts"),
            Self::Fmp4 => write!(f, "fmp4"),
        }
    }
}

/// Whether the last `len` bytes of `name` begin with `prefix`.
///
/// Works on bytes so short or non-ASCII names never split a char boundary.
fn tail_starts_with(name: &str, len: usize, prefix: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= len && bytes[bytes.len() - len..].starts_with(prefix.as_bytes())
}

/// Boundary content-type lookup for a requested segment name.
pub fn segment_mime_type(name: &str) -> Result<&'static str> {
    ContainerFormat::classify(name).map(ContainerFormat::mime_type)
}

/// Raw trailing extension of `name`, including the leading dot.
pub fn file_extension(name: &str) -> Option<&str> {
    name.rfind('.').map(|i| &name[i..])
}

// ---------------------------------------------------------------------------
// DeliveryMode
// ---------------------------------------------------------------------------

/// Rendering strategy for media playlists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Full static sequence.
    Vod,
    /// Sliding window that follows the simulated live edge.
    Live,
    /// Window anchored at the first segment that grows with the live edge.
    Chase,
}

impl DeliveryMode {
    /// Every delivery mode, in routing order.
    pub const ALL: [DeliveryMode; 3] = [Self::Vod, Self::Live, Self::Chase];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vod => "vod",
            Self::Live => "live",
            Self::Chase => "chase",
        }
    }

    /// `Cache-Control` value for playlists rendered in this mode.
    pub fn playlist_cache_control(self) -> &'static str {
        match self {
            Self::Vod => "max-age=60",
            Self::Live | Self::Chase => "no-cache",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vod" => Ok(Self::Vod),
            "live" => Ok(Self::Live),
            "chase" => Ok(Self::Chase),
            other => Err(Error::not_found("delivery mode", other)),
        }
    }
}
