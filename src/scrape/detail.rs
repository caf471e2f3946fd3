//! Detail page extraction

use reqwest::Url;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::listing::collect_cards;
use super::selectors::{absolute_url, attr_of, exists, first_text, poster, text_of, Selectors};
use crate::models::{DetailContent, DetailRecord, EpisodeRecord, MediaKind};

/// Detail page -> full title record
pub struct DetailExtractor<'a> {
    selectors: &'a Selectors,
    site: &'a Url,
}

impl<'a> DetailExtractor<'a> {
    pub fn new(selectors: &'a Selectors, site: &'a Url) -> Self {
        Self { selectors, site }
    }

    /// `None` when the page has no title
    pub fn extract(&self, document: &Html, page_url: &str) -> Option<DetailRecord> {
        let root = document.root_element();
        let s = self.selectors;

        let Some(title) = first_text(root, &s.detail_title) else {
            debug!(url = %page_url, "Detail page has no title");
            return None;
        };

        let poster_url =
            poster(root, &s.detail_poster, &s.poster_attrs).and_then(|src| absolute_url(self.site, &src));

        let genres = root
            .select(&s.genres)
            .map(text_of)
            .filter(|g| !g.is_empty())
            .collect();

        // Recommendation cards carry no kind marker of their own
        let recommendations =
            collect_cards(root, &s.recommendation_card, s, self.site, |_| MediaKind::Movie);

        let content = match classify(root, s) {
            MediaKind::Series => DetailContent::Series {
                episodes: self.episodes(root),
            },
            MediaKind::Movie => DetailContent::Movie {
                data_url: page_url.to_string(),
            },
        };

        Some(DetailRecord {
            title,
            url: page_url.to_string(),
            poster_url,
            plot: first_text(root, &s.plot),
            genres,
            year: self.year(root),
            rating: first_text(root, &s.rating).and_then(|r| parse_rating(&r)),
            recommendations,
            content,
        })
    }

    fn year(&self, root: ElementRef<'_>) -> Option<u16> {
        let s = self.selectors;
        root.select(&s.info_item)
            .filter(|item| text_of(*item).contains(s.year_label.as_str()))
            .find_map(|item| first_text(item, &s.info_value))
            .and_then(|value| value.parse().ok())
    }

    /// Episodes in chronological order; the site lists newest first
    fn episodes(&self, root: ElementRef<'_>) -> Vec<EpisodeRecord> {
        let s = self.selectors;
        let mut episodes: Vec<EpisodeRecord> = root
            .select(&s.episode_item)
            .filter_map(|item| {
                let Some(episode) = attr_of(item, &s.episode_number_attr)
                    .and_then(|n| n.parse::<u32>().ok())
                else {
                    debug!("Skipping episode without a number");
                    return None;
                };

                let Some(data_url) = item
                    .select(&s.episode_link)
                    .find_map(|a| attr_of(a, "href"))
                    .and_then(|href| absolute_url(self.site, &href))
                else {
                    debug!(episode, "Skipping episode without a link");
                    return None;
                };

                Some(EpisodeRecord {
                    season: 1,
                    episode,
                    name: first_text(item, &s.episode_title),
                    data_url,
                })
            })
            .collect();

        episodes.reverse();
        episodes
    }
}

/// Movie vs series for a detail page
///
/// Best-effort: a page is a series when it has an episode section. Sites that
/// mark this differently only need a different `episode_section` selector.
pub fn classify(root: ElementRef<'_>, selectors: &Selectors) -> MediaKind {
    if exists(root, &selectors.episode_section) {
        MediaKind::Series
    } else {
        MediaKind::Movie
    }
}

fn parse_rating(text: &str) -> Option<f32> {
    text.parse::<f32>().ok().filter(|r| r.is_finite())
}
