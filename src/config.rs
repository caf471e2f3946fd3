//! Provider configuration
//!
//! Everything site-specific lives here: base URL, main page categories and
//! every CSS selector used by the extractors. Hosts can hand over a TOML
//! document to override any of it; missing keys fall back to the defaults.
//!
//! Resolution order for the base URL and user agent:
//! 1. Environment variables `ANIKAI_BASE_URL` / `ANIKAI_USER_AGENT`
//! 2. Host-supplied TOML
//! 3. Built-in defaults

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::AnikaiError;

/// Default site root
pub const DEFAULT_BASE_URL: &str = "https://anikai.to";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider name, also used as the source label of direct streams
    pub name: String,
    pub author: String,
    pub base_url: String,
    pub lang: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Main page rows, in display order
    pub categories: Vec<CategoryConfig>,
    /// Path used when the host asks for an unknown category
    pub fallback_path: String,
    pub selectors: SelectorConfig,
}

/// One main page category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub path: String,
}

impl CategoryConfig {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// CSS selectors for every field the extractors read
///
/// These are best-effort heuristics against the site's current markup. When
/// the site changes, override them here rather than in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Title card on category and search pages
    pub list_card: String,
    /// Anchor carrying both the card title and its detail link
    pub card_title: String,
    pub card_poster: String,
    /// Image attributes tried in order; lazy-load attribute first
    pub poster_attrs: Vec<String>,
    /// Presence inside a search card marks it as a series
    pub card_episodes: String,

    pub detail_title: String,
    pub detail_poster: String,
    pub plot: String,
    pub genres: String,
    pub info_item: String,
    pub info_value: String,
    /// Text identifying the info item that holds the release year
    pub year_label: String,
    pub rating: String,

    /// Presence of this section classifies a detail page as a series
    pub episode_section: String,
    pub recommendation_card: String,
    pub episode_item: String,
    pub episode_number_attr: String,
    pub episode_title: String,
    pub episode_link: String,

    /// Embedded player frames, probed in priority order
    pub player_frames: Vec<String>,
    pub video_source: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            list_card: "div.film_list-wrap div.flw-item".to_string(),
            card_title: ".film-name a".to_string(),
            card_poster: ".film-poster img".to_string(),
            poster_attrs: vec!["data-src".to_string(), "src".to_string()],
            card_episodes: ".episodes".to_string(),
            detail_title: "h1.heading-name".to_string(),
            detail_poster: ".film-poster img".to_string(),
            plot: ".description-text".to_string(),
            genres: ".genres a".to_string(),
            info_item: ".aniskip-info-item".to_string(),
            info_value: ".aniskip-info-value".to_string(),
            year_label: "Released".to_string(),
            rating: ".rating-value".to_string(),
            episode_section: ".tab-content #episodes".to_string(),
            recommendation_card: ".film_list-wrap .flw-item".to_string(),
            episode_item: "#episodes-content li.episode-item".to_string(),
            episode_number_attr: "data-episode".to_string(),
            episode_title: ".title".to_string(),
            episode_link: "a".to_string(),
            player_frames: vec![
                "#player-container iframe".to_string(),
                ".play-video iframe".to_string(),
                "iframe[src*=\"/embed/\"]".to_string(),
            ],
            video_source: "video source".to_string(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "Anikai".to_string(),
            author: "hcgn2005-ai".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "en".to_string(),
            user_agent: concat!("anikai-provider/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            categories: vec![
                CategoryConfig::new("Trending Anime", "/trending-anime"),
                CategoryConfig::new("Recently Updated", "/recently-updated"),
                CategoryConfig::new("Latest Releases", "/latest"),
                CategoryConfig::new("Top Airing", "/top-airing"),
                CategoryConfig::new("Popular Movies", "/popular-movies"),
            ],
            fallback_path: "/latest".to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Parse a host-supplied TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, AnikaiError> {
        Ok(toml::from_str(s)?)
    }

    /// Apply `ANIKAI_BASE_URL` and `ANIKAI_USER_AGENT` from the environment
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("ANIKAI_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(ua) = lookup("ANIKAI_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            self.user_agent = ua;
        }
        self
    }

    /// Parsed site root, used as the join base for every relative link
    ///
    /// The path always ends in `/` so a mirror under a sub-path keeps it.
    pub fn site_url(&self) -> Result<Url, AnikaiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AnikaiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(AnikaiError::InvalidUrl(self.base_url.clone()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Configured path for a category name
    pub fn category_path(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.path.as_str())
    }
}
