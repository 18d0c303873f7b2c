//! Playlist directive names and classification.

pub const TAG_PREFIX: &str = "#EXT";
pub const COMMENT_PREFIX: &str = "# ";

pub const EXTM3U: &str = "#EXTM3U";
pub const TARGET_DURATION: &str = "#EXT-X-TARGETDURATION";
pub const MEDIA_SEQUENCE: &str = "#EXT-X-MEDIA-SEQUENCE";
pub const DISCONTINUITY_SEQUENCE: &str = "#EXT-X-DISCONTINUITY-SEQUENCE";
pub const DISCONTINUITY: &str = "#EXT-X-DISCONTINUITY";
pub const MEDIA_DURATION: &str = "#EXTINF";
pub const BYTE_RANGE: &str = "#EXT-X-BYTERANGE";
pub const STREAM_INF: &str = "#EXT-X-STREAM-INF";
pub const ENDLIST: &str = "#EXT-X-ENDLIST";
pub const PLAYLIST_TYPE: &str = "#EXT-X-PLAYLIST-TYPE";
pub const KEY: &str = "#EXT-X-KEY";
pub const MAP: &str = "#EXT-X-MAP";
pub const PROGRAM_DATE_TIME: &str = "#EXT-X-PROGRAM-DATE-TIME";
pub const DATERANGE: &str = "#EXT-X-DATERANGE";
pub const GAP: &str = "#EXT-X-GAP";
pub const BITRATE: &str = "#EXT-X-BITRATE";

/// Placeholder recorded right after the target duration directive.
pub const MEDIA_SEQUENCE_PLACEHOLDER: &str = "#EXT-X-MEDIA-SEQUENCE:0";
/// Placeholder recorded right after the media sequence placeholder.
pub const DISCONTINUITY_SEQUENCE_PLACEHOLDER: &str = "#EXT-X-DISCONTINUITY-SEQUENCE:0";

/// Directives that apply to the media segment that follows them.
const SEGMENT_TAGS: [&str; 9] = [
    MEDIA_DURATION,
    BYTE_RANGE,
    DISCONTINUITY,
    KEY,
    MAP,
    PROGRAM_DATE_TIME,
    DATERANGE,
    GAP,
    BITRATE,
];

/// Whether `line` is the directive `name`, either bare or followed by `:`.
///
/// Unlike a plain prefix test this does not confuse `#EXT-X-DISCONTINUITY`
/// with `#EXT-X-DISCONTINUITY-SEQUENCE`.
pub fn is_tag(line: &str, name: &str) -> bool {
    match line.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with(':'),
        None => false,
    }
}

/// Whether `line` is a media-segment directive rather than a playlist-level one.
pub fn is_segment_tag(line: &str) -> bool {
    SEGMENT_TAGS.iter().any(|name| is_tag(line, name))
}

/// Whether `line` stays in effect for every following segment until replaced.
pub fn is_sticky_tag(line: &str) -> bool {
    is_tag(line, KEY) || is_tag(line, MAP)
}
