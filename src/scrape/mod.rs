//! HTML extraction pipeline
//!
//! - selectors: compiled CSS selectors and DOM helpers
//! - listing: category and search pages
//! - detail: title detail pages
//! - links: watch pages to playable streams
//!
//! Everything here is synchronous over a parsed [`scraper::Html`], except
//! [`LinkResolver::follow`] which awaits the embed extractor.

pub mod detail;
pub mod links;
pub mod listing;
pub mod selectors;

pub use detail::{classify, DetailExtractor};
pub use links::{LinkPlan, LinkResolver};
pub use listing::{ListingExtractor, SearchExtractor};
pub use selectors::Selectors;
