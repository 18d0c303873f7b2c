//! Time-windowed rendering shared by the live and chase loaders.

use bytes::{Bytes, BytesMut};

use super::default::put_line;
use crate::hls::{tags, MediaPlaylist};

/// Number of segments whose start time is at or before `elapsed_ms`.
///
/// The first segment starts at zero, so it is published as soon as the
/// playlist has any segments.
pub fn published_count(playlist: &MediaPlaylist, elapsed_ms: f64) -> usize {
    let mut start_ms = 0.0;
    playlist
        .segments
        .iter()
        .take_while(|segment| {
            let published = start_ms <= elapsed_ms;
            start_ms += segment.duration_ms;
            published
        })
        .count()
}

/// The segment range a windowed media playlist exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Absolute index of the first segment listed.
    pub first: usize,
    /// One past the last segment listed.
    pub end: usize,
    /// Whether the playlist is complete and `#EXT-X-ENDLIST` is emitted.
    pub ended: bool,
    /// Value for `#EXT-X-PLAYLIST-TYPE`, if any.
    pub playlist_type: Option<&'static str>,
}

impl Window {
    /// Sliding window of at most `window_segments` segments ending at the
    /// live edge.
    pub fn live(playlist: &MediaPlaylist, elapsed_ms: f64, window_segments: usize) -> Self {
        let end = published_count(playlist, elapsed_ms);
        Self {
            first: end.saturating_sub(window_segments),
            end,
            ended: is_ended(playlist, elapsed_ms),
            playlist_type: None,
        }
    }

    /// Window anchored at the first segment and growing with the live edge.
    pub fn chase(playlist: &MediaPlaylist, elapsed_ms: f64) -> Self {
        Self {
            first: 0,
            end: published_count(playlist, elapsed_ms),
            ended: is_ended(playlist, elapsed_ms),
            playlist_type: Some("EVENT"),
        }
    }
}

fn is_ended(playlist: &MediaPlaylist, elapsed_ms: f64) -> bool {
    elapsed_ms >= playlist.total_duration_ms
}

/// Render the segments in `window` as a standalone media playlist.
///
/// Playlist-level directives before the first segment form the header.
/// Every other directive is emitted with the segment it precedes, so only
/// listed segments carry their directives. Reference lines use the absolute
/// segment index plus the segment's own extension, so `<k><ext>` resolves to
/// the same segment in every mode.
pub fn render_window(playlist: &MediaPlaylist, window: &Window) -> Bytes {
    let mut out = BytesMut::new();
    let end = window.end.min(playlist.segments.len());
    let first = window.first.min(end);
    let discontinuity_sequence = playlist
        .segment(first)
        .filter(|_| first > 0)
        .map(|segment| segment.discontinuity_sequence)
        .unwrap_or(0);

    let header_end = playlist
        .segments
        .first()
        .map_or(playlist.tags.len(), |segment| segment.tag_index);
    let header = &playlist.tags[..header_end];

    for tag in header.iter().filter(|tag| !tags::is_segment_tag(tag)) {
        if tags::is_tag(tag, tags::MEDIA_SEQUENCE) {
            put_line(&mut out, &format!("{}:{first}", tags::MEDIA_SEQUENCE));
        } else if tags::is_tag(tag, tags::DISCONTINUITY_SEQUENCE) {
            put_line(
                &mut out,
                &format!("{}:{discontinuity_sequence}", tags::DISCONTINUITY_SEQUENCE),
            );
        } else if !is_window_managed(tag) {
            put_line(&mut out, tag);
        }
    }

    if let Some(playlist_type) = window.playlist_type {
        put_line(&mut out, &format!("{}:{playlist_type}", tags::PLAYLIST_TYPE));
    }

    for index in first..end {
        let segment_tags: Vec<&str> = match index {
            0 => header
                .iter()
                .filter(|tag| tags::is_segment_tag(tag))
                .map(String::as_str)
                .collect(),
            _ => playlist
                .segment_tags(index)
                .iter()
                .filter(|tag| !is_window_managed(tag))
                .map(String::as_str)
                .collect(),
        };
        if index == first && first > 0 {
            for sticky in sticky_tags_before(playlist, first, &segment_tags) {
                put_line(&mut out, sticky);
            }
        }
        // A discontinuity before the first listed segment is already counted
        // in the discontinuity sequence, except at the start of the stream.
        let folded = index == first && first > 0;
        for tag in segment_tags
            .iter()
            .filter(|tag| !folded || !tags::is_tag(tag, tags::DISCONTINUITY))
        {
            put_line(&mut out, tag);
        }
        let segment = &playlist.segments[index];
        put_line(&mut out, &format!("{index}{}", segment.file_extension));
    }

    let trailing = playlist
        .segments
        .last()
        .filter(|_| end == playlist.segments.len());
    if let Some(last) = trailing {
        for tag in playlist.tags[last.tag_index..]
            .iter()
            .filter(|tag| !is_window_managed(tag))
        {
            put_line(&mut out, tag);
        }
    }

    if window.ended {
        put_line(&mut out, tags::ENDLIST);
    }

    out.freeze()
}

/// Directives the window rewrites or emits itself.
fn is_window_managed(tag: &str) -> bool {
    [
        tags::ENDLIST,
        tags::PLAYLIST_TYPE,
        tags::MEDIA_SEQUENCE,
        tags::DISCONTINUITY_SEQUENCE,
    ]
    .iter()
    .any(|name| tags::is_tag(tag, name))
}

/// Latest key and map directives in effect when segment `first` starts,
/// unless `first` carries its own.
fn sticky_tags_before<'a>(
    playlist: &'a MediaPlaylist,
    first: usize,
    first_tags: &[&str],
) -> Vec<&'a str> {
    let preceding = &playlist.tags[..playlist.segments[first - 1].tag_index];
    [tags::KEY, tags::MAP]
        .into_iter()
        .filter(|name| !first_tags.iter().any(|tag| tags::is_tag(tag, name)))
        .filter_map(|name| {
            preceding
                .iter()
                .rev()
                .find(|tag| tags::is_tag(tag, name))
                .map(String::as_str)
        })
        .collect()
}
