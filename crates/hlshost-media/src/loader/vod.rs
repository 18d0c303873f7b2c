//! Static VOD rendering of media playlists.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use hlshost_core::{DeliveryMode, Result};

use super::default::put_line;
use super::{media_playlist, Loader};
use crate::hls::{tags, MasterPlaylist, MediaPlaylist};

/// Serves the full static sequence of every media playlist.
///
/// Holds one snapshot for its whole lifetime; reloads are not observed.
#[derive(Debug, Clone)]
pub struct VodLoader {
    master: Arc<MasterPlaylist>,
}

impl VodLoader {
    pub fn new(master: Arc<MasterPlaylist>) -> Self {
        Self { master }
    }
}

impl Loader for VodLoader {
    fn mode(&self) -> DeliveryMode {
        DeliveryMode::Vod
    }

    fn snapshot(&self) -> Arc<MasterPlaylist> {
        Arc::clone(&self.master)
    }

    fn load_media_playlist(&self, index: usize) -> Result<Bytes> {
        let media = media_playlist(&self.master, index)?;
        Ok(render_media_playlist(media))
    }
}

/// Emit the playlist tags verbatim with `<k>.ts` after each `#EXTINF`.
///
/// Segments are always named with `.ts`, whatever their source container.
// TODO: name fMP4 segments by their own extension once players fetching
// `.ts` names for fMP4 content are no longer a concern.
pub fn render_media_playlist(media: &MediaPlaylist) -> Bytes {
    let mut out = BytesMut::new();
    let mut segment_index = 0usize;

    for tag in &media.tags {
        put_line(&mut out, tag);
        if tag.starts_with(tags::MEDIA_DURATION) {
            put_line(&mut out, &format!("{segment_index}.ts"));
            segment_index += 1;
        }
    }

    out.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Parser, PlaylistReader};
    use std::path::Path;

    struct OneFile(&'static str);

    impl PlaylistReader for OneFile {
        fn read(&self, _path: &Path) -> std::io::Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    fn parse_media(text: &'static str) -> MediaPlaylist {
        Parser::with_reader(Arc::new(OneFile(text)))
            .parse_media_playlist(Path::new("index.m3u8"))
            .unwrap()
    }

    #[test]
    fn renders_sequential_ts_names() {
        let media = parse_media(
            "#EXTM3U\n#EXT-X-TARGETDURATION:6\n#EXT-X-MEDIA-SEQUENCE:9\n\
             #EXTINF:6.0,\nfirst.m4s\n#EXT-X-DISCONTINUITY\n\
             #EXTINF:5.0,\nsecond.m4s\n#EXT-X-ENDLIST\n",
        );
        let out = render_media_playlist(&media);
        let expected = "\
#EXTM3U
#EXT-X-TARGETDURATION:6
#EXT-X-MEDIA-SEQUENCE:0
#EXT-X-DISCONTINUITY-SEQUENCE:0
#EXTINF:6.0,
0.ts
#EXT-X-DISCONTINUITY
#EXTINF:5.0,
1.ts
#EXT-X-ENDLIST
";
        assert_eq!(out, expected.as_bytes());
    }

    #[test]
    fn one_reference_per_duration_tag() {
        let media = parse_media(
            "#EXTM3U\n#EXTINF:2,\na.ts\n#EXTINF:2,\nb.ts\n#EXTINF:2,\nc.ts\n#EXTINF:2,\nd.ts\n",
        );
        let text = String::from_utf8(render_media_playlist(&media).to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        for k in 0..4 {
            let pos = lines.iter().position(|l| *l == format!("{k}.ts")).unwrap();
            assert!(lines[pos - 1].starts_with("#EXTINF"));
        }
        assert_eq!(lines.iter().filter(|l| l.ends_with(".ts")).count(), 4);
    }

    #[test]
    fn loader_bounds_checks_index() {
        let master = MasterPlaylist {
            media_playlists: vec![parse_media("#EXTINF:1,\na.ts\n")],
            ..Default::default()
        };
        let loader = VodLoader::new(Arc::new(master));
        assert_eq!(loader.mode(), DeliveryMode::Vod);
        assert_eq!(
            loader.load_media_playlist(0).unwrap(),
            "#EXTINF:1,\n0.ts\n".as_bytes()
        );
        assert!(loader.load_media_playlist(1).is_err());
    }
}
