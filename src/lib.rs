//! Anikai - content provider for the anikai.to anime catalogue
//!
//! Turns category, search, detail and watch pages into typed records for a
//! media-browsing host. The host drives everything through
//! [`ContentProvider`]; page fetching and embed decoding are injected.
//!
//! # Modules
//!
//! - `models` - Records handed to the host (summaries, details, streams)
//! - `api` - External collaborators (page fetcher, embed extractor, link sinks)
//! - `scrape` - CSS selector based extractors
//! - `provider` - The host-facing provider
//! - `config` - Site constants and selector overrides
//! - `error` - Typed errors

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod scrape;

// Re-export commonly used types
pub use models::{
    DetailContent, DetailRecord, EpisodeRecord, HomePageList, MediaKind, Quality,
    StreamDescriptor, SubtitleTrack, SummaryRecord,
};

pub use api::{Callbacks, EmbedExtractor, HttpFetcher, LinkCollector, LinkSink, PageFetcher};
pub use config::{CategoryConfig, ProviderConfig, SelectorConfig};
pub use error::AnikaiError;
pub use provider::{AnikaiProvider, ContentProvider};
