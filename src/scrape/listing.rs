//! Listing and search page extraction
//!
//! Both pages render the same title card. They only differ in how a card's
//! media kind is decided: category listings are always series, search cards
//! are series only when they carry an episode counter.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::selectors::{absolute_url, attr_of, exists, poster, text_of, Selectors};
use crate::models::{MediaKind, SummaryRecord};

/// Category page -> summary cards
pub struct ListingExtractor<'a> {
    selectors: &'a Selectors,
    site: &'a Url,
}

impl<'a> ListingExtractor<'a> {
    pub fn new(selectors: &'a Selectors, site: &'a Url) -> Self {
        Self { selectors, site }
    }

    /// Cards in page order; cards without a title or link are dropped
    pub fn extract(&self, document: &Html) -> Vec<SummaryRecord> {
        collect_cards(
            document.root_element(),
            &self.selectors.list_card,
            self.selectors,
            self.site,
            |_| MediaKind::Series,
        )
    }
}

/// Search results page -> summary cards with kind probing
pub struct SearchExtractor<'a> {
    selectors: &'a Selectors,
    site: &'a Url,
}

impl<'a> SearchExtractor<'a> {
    pub fn new(selectors: &'a Selectors, site: &'a Url) -> Self {
        Self { selectors, site }
    }

    pub fn extract(&self, document: &Html) -> Vec<SummaryRecord> {
        let episodes = &self.selectors.card_episodes;
        collect_cards(
            document.root_element(),
            &self.selectors.list_card,
            self.selectors,
            self.site,
            |card| {
                if exists(card, episodes) {
                    MediaKind::Series
                } else {
                    MediaKind::Movie
                }
            },
        )
    }
}

/// Parse every card matched by `card` under `scope`
///
/// Shared by listings, search and detail page recommendations.
pub(crate) fn collect_cards<F>(
    scope: ElementRef<'_>,
    card: &Selector,
    selectors: &Selectors,
    site: &Url,
    kind_of: F,
) -> Vec<SummaryRecord>
where
    F: Fn(ElementRef<'_>) -> MediaKind,
{
    scope
        .select(card)
        .filter_map(|el| parse_card(el, selectors, site, kind_of(el)))
        .collect()
}

fn parse_card(
    card: ElementRef<'_>,
    selectors: &Selectors,
    site: &Url,
    kind: MediaKind,
) -> Option<SummaryRecord> {
    let Some(anchor) = card.select(&selectors.card_title).next() else {
        debug!("Skipping card without title anchor");
        return None;
    };

    let title = text_of(anchor);
    if title.is_empty() {
        debug!("Skipping card with empty title");
        return None;
    }

    let Some(url) = attr_of(anchor, "href").and_then(|href| absolute_url(site, &href)) else {
        debug!(title = %title, "Skipping card without link");
        return None;
    };

    let poster_url = poster(card, &selectors.card_poster, &selectors.poster_attrs)
        .and_then(|src| absolute_url(site, &src));

    Some(SummaryRecord {
        title,
        url,
        poster_url,
        kind,
    })
}
