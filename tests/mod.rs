//! Integration tests for the Anikai provider
//!
//! Tests are organized by component:
//! - listing_test: Listing and search card extraction
//! - detail_test: Detail page extraction (metadata, episodes, recommendations)
//! - links_test: Watch page link resolution
//! - e2e_test: End-to-end flow tests against a mock site (Category -> Detail -> Links)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
