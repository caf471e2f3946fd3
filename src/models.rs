//! Data structures for the Anikai provider
//!
//! Contains all records handed to the host, organized by stage:
//! - **Listing**: summary cards from category, search and recommendation lists
//! - **Detail**: full title metadata with either episodes or a movie link
//! - **Links**: playable stream descriptors and subtitle tracks

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Listing Models
// =============================================================================

/// Media kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Series => write!(f, "TV Series"),
        }
    }
}

/// Title card from a listing, search or recommendation block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub title: String,
    /// Absolute detail page URL
    pub url: String,
    pub poster_url: Option<String>,
    pub kind: MediaKind,
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.kind)
    }
}

/// One named row of the main page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePageList {
    pub name: String,
    pub items: Vec<SummaryRecord>,
}

// =============================================================================
// Detail Models
// =============================================================================

/// Episode of a series, in chronological order within its detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Always 1; the site has no season grouping
    pub season: u32,
    pub episode: u32,
    pub name: Option<String>,
    /// Episode page URL, later passed to link resolution
    pub data_url: String,
}

impl fmt::Display for EpisodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "S{:02}E{:02} - {}", self.season, self.episode, name),
            None => write!(f, "S{:02}E{:02}", self.season, self.episode),
        }
    }
}

/// What a detail page offers for playback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DetailContent {
    /// The detail page itself is the playable reference
    Movie { data_url: String },
    Series { episodes: Vec<EpisodeRecord> },
}

/// Full record for one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub title: String,
    pub url: String,
    pub poster_url: Option<String>,
    pub plot: Option<String>,
    pub genres: Vec<String>,
    pub year: Option<u16>,
    pub rating: Option<f32>,
    pub recommendations: Vec<SummaryRecord>,
    pub content: DetailContent,
}

impl DetailRecord {
    pub fn kind(&self) -> MediaKind {
        match self.content {
            DetailContent::Movie { .. } => MediaKind::Movie,
            DetailContent::Series { .. } => MediaKind::Series,
        }
    }

    /// Episodes in chronological order (empty for movies)
    pub fn episodes(&self) -> &[EpisodeRecord] {
        match &self.content {
            DetailContent::Series { episodes } => episodes,
            DetailContent::Movie { .. } => &[],
        }
    }

    /// Playable reference for movies
    pub fn data_url(&self) -> Option<&str> {
        match &self.content {
            DetailContent::Movie { data_url } => Some(data_url),
            DetailContent::Series { .. } => None,
        }
    }
}

impl fmt::Display for DetailRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.kind())?;
        if let Some(rating) = self.rating {
            write!(f, " - ⭐ {:.1}", rating)?;
        }
        if let DetailContent::Series { episodes } = &self.content {
            write!(f, " - {} episodes", episodes.len())?;
        }
        Ok(())
    }
}

// =============================================================================
// Link Models
// =============================================================================

/// Video quality classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Quality {
    UHD4K,
    FHD1080p,
    HD720p,
    SD480p,
    #[default]
    Unknown,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::UHD4K => write!(f, "4K"),
            Quality::FHD1080p => write!(f, "1080p"),
            Quality::HD720p => write!(f, "720p"),
            Quality::SD480p => write!(f, "480p"),
            Quality::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Playable stream handed to the host player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Provider or extractor that produced the link
    pub source: String,
    /// Label shown to the user
    pub name: String,
    pub url: String,
    /// Referer header the player must send
    pub referer: String,
    pub quality: Quality,
    /// HLS (m3u8) playlist rather than a progressive file
    pub is_hls: bool,
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_hls { "HLS" } else { "file" };
        write!(f, "[{}] {} - {} ({})", self.quality, self.source, self.name, kind)
    }
}

/// Subtitle track discovered while resolving links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub lang: String,
    pub url: String,
}

impl SubtitleTrack {
    pub fn new(lang: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.lang, self.url)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
