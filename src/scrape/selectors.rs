//! Compiled selectors and small DOM helpers shared by the extractors

use reqwest::Url;
use scraper::{ElementRef, Selector};

use crate::config::SelectorConfig;
use crate::error::AnikaiError;

/// [`SelectorConfig`] compiled once per provider
#[derive(Debug, Clone)]
pub struct Selectors {
    pub list_card: Selector,
    pub card_title: Selector,
    pub card_poster: Selector,
    pub poster_attrs: Vec<String>,
    pub card_episodes: Selector,

    pub detail_title: Selector,
    pub detail_poster: Selector,
    pub plot: Selector,
    pub genres: Selector,
    pub info_item: Selector,
    pub info_value: Selector,
    pub year_label: String,
    pub rating: Selector,

    pub episode_section: Selector,
    pub recommendation_card: Selector,
    pub episode_item: Selector,
    pub episode_number_attr: String,
    pub episode_title: Selector,
    pub episode_link: Selector,

    pub player_frames: Vec<Selector>,
    pub video_source: Selector,
}

impl Selectors {
    /// Compile every selector, failing on the first invalid one
    pub fn new(config: &SelectorConfig) -> Result<Self, AnikaiError> {
        Ok(Self {
            list_card: compile(&config.list_card)?,
            card_title: compile(&config.card_title)?,
            card_poster: compile(&config.card_poster)?,
            poster_attrs: config.poster_attrs.clone(),
            card_episodes: compile(&config.card_episodes)?,
            detail_title: compile(&config.detail_title)?,
            detail_poster: compile(&config.detail_poster)?,
            plot: compile(&config.plot)?,
            genres: compile(&config.genres)?,
            info_item: compile(&config.info_item)?,
            info_value: compile(&config.info_value)?,
            year_label: config.year_label.clone(),
            rating: compile(&config.rating)?,
            episode_section: compile(&config.episode_section)?,
            recommendation_card: compile(&config.recommendation_card)?,
            episode_item: compile(&config.episode_item)?,
            episode_number_attr: config.episode_number_attr.clone(),
            episode_title: compile(&config.episode_title)?,
            episode_link: compile(&config.episode_link)?,
            player_frames: config
                .player_frames
                .iter()
                .map(|s| compile(s))
                .collect::<Result<_, _>>()?,
            video_source: compile(&config.video_source)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, AnikaiError> {
    Selector::parse(selector).map_err(|e| AnikaiError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Text content of an element with whitespace runs collapsed to one space
pub fn text_of(element: ElementRef<'_>) -> String {
    let text = element.text().collect::<String>();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed text of the first match, `None` when missing or blank
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty())
}

/// Non-blank attribute value of an element
pub fn attr_of(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Poster URL of the first image match, trying `attrs` in order
pub fn poster(scope: ElementRef<'_>, selector: &Selector, attrs: &[String]) -> Option<String> {
    let img = scope.select(selector).next()?;
    attrs.iter().find_map(|attr| attr_of(img, attr))
}

/// Whether anything inside `scope` matches
pub fn exists(scope: ElementRef<'_>, selector: &Selector) -> bool {
    scope.select(selector).next().is_some()
}

/// Resolve an href against the site root
///
/// Site-relative hrefs (`/watch/..`) land below the root's path, not at the
/// host root. `site` must end in `/`, see [`ProviderConfig::site_url`].
///
/// [`ProviderConfig::site_url`]: crate::config::ProviderConfig::site_url
pub fn absolute_url(site: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    join_site(site, href).map(String::from)
}

/// Join a path or href below the site root
pub fn join_site(site: &Url, href: &str) -> Option<Url> {
    let relative = if href.starts_with("//") {
        href
    } else {
        href.trim_start_matches('/')
    };
    site.join(relative).ok()
}
