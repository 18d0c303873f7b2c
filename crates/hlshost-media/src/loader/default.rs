//! Rendering shared by every delivery mode: the master playlist and raw
//! segment bytes.

use bytes::{BufMut, Bytes, BytesMut};
use hlshost_core::{Error, Result};

use super::media_playlist;
use crate::hls::{tags, MasterPlaylist};

/// Emit the master playlist tags, rewiring each variant stream to
/// `<n>/playlist.m3u8`.
pub fn render_master_playlist(master: &MasterPlaylist) -> Bytes {
    let mut out = BytesMut::new();
    let mut media_playlist_index = 0usize;

    for tag in &master.tags {
        put_line(&mut out, tag);
        if tag.starts_with(tags::STREAM_INF) {
            put_line(&mut out, &format!("{media_playlist_index}/playlist.m3u8"));
            media_playlist_index += 1;
        }
    }

    out.freeze()
}

/// Read segment `segment_index` of media playlist `media_index` from disk.
///
/// The file is resolved against the directory of its media playlist. A file
/// that cannot be read is reported as [`Error::NotFound`].
pub fn read_segment(
    master: &MasterPlaylist,
    media_index: usize,
    segment_index: usize,
) -> Result<Bytes> {
    let media = media_playlist(master, media_index)?;
    let segment = media
        .segment(segment_index)
        .ok_or_else(|| Error::not_found("segment", format!("{media_index}/{segment_index}")))?;

    let path = media.base_dir().join(&segment.path);
    match std::fs::read(&path) {
        Ok(data) => Ok(Bytes::from(data)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read segment");
            Err(Error::not_found("segment file", path.display()))
        }
    }
}

pub(crate) fn put_line(out: &mut BytesMut, line: &str) {
    out.put_slice(line.as_bytes());
    out.put_u8(b'\n');
}
