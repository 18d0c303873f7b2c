//! HLS playlist types.

use hlshost_core::ContainerFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A master playlist and every media playlist it references.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MasterPlaylist {
    /// Source file location.
    pub path: PathBuf,
    /// Directive lines exactly as encountered, in file order.
    pub tags: Vec<String>,
    /// One entry per reference line in the master, in file order.
    pub media_playlists: Vec<MediaPlaylist>,
}

impl MasterPlaylist {
    pub fn media_playlist(&self, index: usize) -> Option<&MediaPlaylist> {
        self.media_playlists.get(index)
    }
}

/// A media playlist for one variant stream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaPlaylist {
    /// Source file location.
    pub path: PathBuf,
    /// Directive lines in file order, with media-sequence and
    /// discontinuity-sequence directives replaced by synthesized placeholders.
    pub tags: Vec<String>,
    /// Segments in file order.
    pub segments: Vec<Segment>,
    /// Sum of all segment durations.
    pub total_duration_ms: f64,
    /// Number of discontinuity directives encountered.
    pub total_discontinuity_count: u64,
}

impl MediaPlaylist {
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Directory segment paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Directive lines located between the previous segment's reference line
    /// and the reference line of segment `index`.
    ///
    /// For the first segment this includes the playlist header.
    pub fn segment_tags(&self, index: usize) -> &[String] {
        let Some(segment) = self.segments.get(index) else {
            return &[];
        };
        let start = match index {
            0 => 0,
            _ => self.segments[index - 1].tag_index,
        };
        &self.tags[start..segment.tag_index]
    }
}

/// A single addressable media segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// URI as written in the source, relative to the owning playlist.
    pub path: String,
    pub duration_ms: f64,
    /// Count of discontinuity directives strictly before this segment.
    pub discontinuity_sequence: u64,
    /// Raw trailing extension, including the dot.
    pub file_extension: String,
    pub container_format: ContainerFormat,
    /// Number of owning-playlist tags recorded before this segment's
    /// reference line.
    pub tag_index: usize,
}
