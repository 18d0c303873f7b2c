//! Line-oriented M3U8 parser.
//!
//! [`Parser::parse_master_playlist`] reads a master playlist and recursively
//! parses every media playlist it references. Paths are resolved relative to
//! the directory of the referencing file. Files are read through a
//! [`PlaylistReader`] so the tree can come from disk or from memory.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hlshost_core::{file_extension, ContainerFormat, Error, Result};

use crate::hls::tags;
use crate::hls::{MasterPlaylist, MediaPlaylist, Segment};

/// Source of playlist file contents.
pub trait PlaylistReader: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads playlists from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl PlaylistReader for FsReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Builds the playlist model from master and media playlist files.
#[derive(Clone)]
pub struct Parser {
    reader: Arc<dyn PlaylistReader>,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser that reads from the filesystem.
    pub fn new() -> Self {
        Self::with_reader(Arc::new(FsReader))
    }

    pub fn with_reader(reader: Arc<dyn PlaylistReader>) -> Self {
        Self { reader }
    }

    /// Parse a full tree rooted at the master playlist at `path`.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<MasterPlaylist> {
        self.parse_master_playlist(path.as_ref())
    }

    pub fn parse_master_playlist(&self, path: &Path) -> Result<MasterPlaylist> {
        let text = self.read_text(path)?;
        let base_dir = parent_dir(path);

        let mut tags = Vec::new();
        let mut media_playlists = Vec::new();

        for line in text.lines() {
            if line.is_empty() || line.starts_with(tags::COMMENT_PREFIX) {
                continue;
            }
            if line.starts_with(tags::TAG_PREFIX) {
                tags.push(line.to_string());
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            let media_playlist = self.parse_media_playlist(&base_dir.join(line))?;
            media_playlists.push(media_playlist);
        }

        tracing::debug!(
            path = %path.display(),
            tags = tags.len(),
            media_playlists = media_playlists.len(),
            "Parsed master playlist"
        );

        Ok(MasterPlaylist {
            path: path.to_path_buf(),
            tags,
            media_playlists,
        })
    }

    pub fn parse_media_playlist(&self, path: &Path) -> Result<MediaPlaylist> {
        let text = self.read_text(path)?;

        let mut tags: Vec<String> = Vec::new();
        let mut segments = Vec::new();
        let mut total_duration_ms = 0.0;
        let mut discontinuity_sequence = 0u64;
        // Index into `tags` of the most recent #EXTINF.
        let mut last_duration_tag: Option<usize> = None;

        for line in text.lines() {
            if line.is_empty() || line.starts_with(tags::COMMENT_PREFIX) {
                continue;
            }
            // Sequence numbers are always synthesized at render time.
            if line.starts_with(tags::MEDIA_SEQUENCE)
                || line.starts_with(tags::DISCONTINUITY_SEQUENCE)
            {
                continue;
            }
            if line.starts_with(tags::TAG_PREFIX) {
                tags.push(line.to_string());
                if line.starts_with(tags::TARGET_DURATION) {
                    tags.push(tags::MEDIA_SEQUENCE_PLACEHOLDER.to_string());
                    tags.push(tags::DISCONTINUITY_SEQUENCE_PLACEHOLDER.to_string());
                } else if line.starts_with(tags::DISCONTINUITY) {
                    discontinuity_sequence += 1;
                } else if line.starts_with(tags::MEDIA_DURATION) {
                    last_duration_tag = Some(tags.len() - 1);
                }
                continue;
            }
            if line.starts_with('#') {
                continue;
            }

            let duration_tag = last_duration_tag.map(|i| tags[i].as_str()).ok_or_else(|| {
                Error::parse(path, format!("segment '{line}' has no preceding #EXTINF"))
            })?;
            let duration_ms = parse_duration_secs(path, duration_tag)? * 1000.0;
            let container_format = ContainerFormat::classify(line)?;

            segments.push(Segment {
                path: line.to_string(),
                duration_ms,
                discontinuity_sequence,
                file_extension: file_extension(line).unwrap_or_default().to_string(),
                container_format,
                tag_index: tags.len(),
            });
            total_duration_ms += duration_ms;
        }

        tracing::debug!(
            path = %path.display(),
            segments = segments.len(),
            total_duration_ms,
            discontinuities = discontinuity_sequence,
            "Parsed media playlist"
        );

        Ok(MediaPlaylist {
            path: path.to_path_buf(),
            tags,
            segments,
            total_duration_ms,
            total_discontinuity_count: discontinuity_sequence,
        })
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let data = self.reader.read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        String::from_utf8(data).map_err(|_| Error::parse(path, "playlist is not valid UTF-8"))
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Seconds value of an `#EXTINF:<seconds>,[<title>]` directive.
fn parse_duration_secs(path: &Path, tag: &str) -> Result<f64> {
    let value = tag
        .strip_prefix(tags::MEDIA_DURATION)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or_default();
    let value = value.split_once(',').map_or(value, |(secs, _title)| secs);

    match value.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(Error::parse(path, format!("invalid duration in '{tag}'"))),
    }
}
