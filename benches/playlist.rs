//! Benchmark playlist parsing and per-mode rendering over a long synthetic
//! media playlist (2000 segments, a discontinuity every 100).

use std::path::Path;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hlshost_media::loader::window::{render_window, Window};
use hlshost_media::loader::vod::render_media_playlist;
use hlshost_media::{Parser, PlaylistReader};

struct Synthetic {
    master: Vec<u8>,
    media: Vec<u8>,
}

impl Synthetic {
    fn new(segments: usize) -> Self {
        let master = b"#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=800000\nlow/index.m3u8\n".to_vec();
        let mut media = String::from("#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:6\n");
        for i in 0..segments {
            if i > 0 && i % 100 == 0 {
                media.push_str("#EXT-X-DISCONTINUITY\n");
            }
            media.push_str(&format!("#EXTINF:6.006,\nsegment_{i:05}.ts\n"));
        }
        media.push_str("#EXT-X-ENDLIST\n");
        Self {
            master,
            media: media.into_bytes(),
        }
    }
}

impl PlaylistReader for Synthetic {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        if path.ends_with("playlist.m3u8") {
            Ok(self.master.clone())
        } else {
            Ok(self.media.clone())
        }
    }
}

fn bench_playlist(c: &mut Criterion) {
    let parser = Parser::with_reader(Arc::new(Synthetic::new(2000)));
    let master = parser.parse("playlist.m3u8").unwrap();
    let media = &master.media_playlists[0];

    let mut group = c.benchmark_group("playlist");

    group.bench_function("parse_tree", |b| {
        b.iter(|| parser.parse(black_box("playlist.m3u8")).unwrap());
    });

    group.bench_function("render_vod", |b| {
        b.iter(|| render_media_playlist(black_box(media)));
    });

    // Live edge in the middle of the stream.
    let elapsed_ms = media.total_duration_ms / 2.0;
    group.bench_function("render_live_window", |b| {
        b.iter(|| {
            let window = Window::live(media, black_box(elapsed_ms), 3);
            render_window(media, &window)
        });
    });

    group.bench_function("render_chase_window", |b| {
        b.iter(|| {
            let window = Window::chase(media, black_box(elapsed_ms));
            render_window(media, &window)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_playlist);
criterion_main!(benches);
