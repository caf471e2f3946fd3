//! Embed extractor seam and link sinks
//!
//! Third-party players (the iframe targets found on watch pages) are decoded
//! by the host's own extractor registry. The provider only locates the embed
//! URL and hands it over together with a [`LinkSink`] that receives whatever
//! the extractor finds.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{StreamDescriptor, SubtitleTrack};

/// Receiver for links found during resolution
///
/// Streams and subtitles arrive on separate channels; a subtitle may be
/// emitted without any stream and vice versa.
pub trait LinkSink: Send {
    fn subtitle(&mut self, track: SubtitleTrack);
    fn stream(&mut self, stream: StreamDescriptor);
}

/// Decodes a known embed player URL into streams
#[async_trait]
pub trait EmbedExtractor: Send + Sync {
    /// Returns `true` if at least one stream was emitted into `sink`
    async fn extract(&self, url: &str, referer: &str, sink: &mut dyn LinkSink) -> Result<bool>;
}

/// Sink that keeps everything it receives
#[derive(Debug, Default, Clone)]
pub struct LinkCollector {
    pub streams: Vec<StreamDescriptor>,
    pub subtitles: Vec<SubtitleTrack>,
}

impl LinkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty() && self.subtitles.is_empty()
    }
}

impl LinkSink for LinkCollector {
    fn subtitle(&mut self, track: SubtitleTrack) {
        self.subtitles.push(track);
    }

    fn stream(&mut self, stream: StreamDescriptor) {
        self.streams.push(stream);
    }
}

/// Adapts a pair of closures into a [`LinkSink`]
pub struct Callbacks<S, L> {
    pub on_subtitle: S,
    pub on_stream: L,
}

impl<S, L> Callbacks<S, L>
where
    S: FnMut(SubtitleTrack) + Send,
    L: FnMut(StreamDescriptor) + Send,
{
    pub fn new(on_subtitle: S, on_stream: L) -> Self {
        Self {
            on_subtitle,
            on_stream,
        }
    }
}

impl<S, L> LinkSink for Callbacks<S, L>
where
    S: FnMut(SubtitleTrack) + Send,
    L: FnMut(StreamDescriptor) + Send,
{
    fn subtitle(&mut self, track: SubtitleTrack) {
        (self.on_subtitle)(track)
    }

    fn stream(&mut self, stream: StreamDescriptor) {
        (self.on_stream)(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quality;

    fn stream(url: &str) -> StreamDescriptor {
        StreamDescriptor {
            source: "Test".to_string(),
            name: "Test".to_string(),
            url: url.to_string(),
            referer: "https://anikai.to/".to_string(),
            quality: Quality::Unknown,
            is_hls: false,
        }
    }

    #[test]
    fn test_collector_keeps_channels_apart() {
        let mut sink = LinkCollector::new();
        assert!(sink.is_empty());

        sink.subtitle(SubtitleTrack::new("English", "https://cdn.example/en.vtt"));
        sink.stream(stream("https://cdn.example/a.mp4"));
        sink.stream(stream("https://cdn.example/b.mp4"));

        assert_eq!(sink.subtitles.len(), 1);
        assert_eq!(sink.streams.len(), 2);
        assert_eq!(sink.streams[1].url, "https://cdn.example/b.mp4");
    }

    #[test]
    fn test_callbacks_forward() {
        let mut subs = Vec::new();
        let mut urls = Vec::new();
        {
            let mut sink = Callbacks::new(
                |t: SubtitleTrack| subs.push(t.lang),
                |s: StreamDescriptor| urls.push(s.url),
            );
            sink.stream(stream("https://cdn.example/a.mp4"));
            sink.subtitle(SubtitleTrack::new("Spanish", "https://cdn.example/es.srt"));
        }
        assert_eq!(subs, vec!["Spanish".to_string()]);
        assert_eq!(urls, vec!["https://cdn.example/a.mp4".to_string()]);
    }
}
