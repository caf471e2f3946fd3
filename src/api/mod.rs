//! External collaborators
//!
//! - fetch: page fetching (`PageFetcher`, reqwest-backed `HttpFetcher`)
//! - embed: the host's embed extractor seam and link sinks

pub mod embed;
pub mod fetch;

pub use embed::{Callbacks, EmbedExtractor, LinkCollector, LinkSink};
pub use fetch::{HttpFetcher, PageFetcher};
