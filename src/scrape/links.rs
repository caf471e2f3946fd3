//! Playable link resolution
//!
//! Resolution is split in two so the parsed page never lives across an
//! await: [`LinkResolver::plan`] inspects the markup synchronously and
//! [`LinkResolver::follow`] acts on the outcome.

use anyhow::Result;
use reqwest::Url;
use scraper::Html;
use tracing::{debug, info};

use super::selectors::{absolute_url, attr_of, Selectors};
use crate::api::embed::{EmbedExtractor, LinkSink};
use crate::models::{Quality, StreamDescriptor};

/// What a watch page offers, first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkPlan {
    /// Absolute URL of an embedded third-party player
    Embed(String),
    /// Video file referenced directly by the page
    Direct(String),
    Nothing,
}

pub struct LinkResolver<'a> {
    selectors: &'a Selectors,
    site: &'a Url,
}

impl<'a> LinkResolver<'a> {
    pub fn new(selectors: &'a Selectors, site: &'a Url) -> Self {
        Self { selectors, site }
    }

    /// Probe player frames in priority order, then direct video sources
    pub fn plan(&self, document: &Html) -> LinkPlan {
        let root = document.root_element();

        let frame = self.selectors.player_frames.iter().find_map(|selector| {
            root.select(selector)
                .find_map(|iframe| attr_of(iframe, "src"))
                .and_then(|src| self.frame_url(&src))
        });
        if let Some(url) = frame {
            return LinkPlan::Embed(url);
        }

        let direct = root
            .select(&self.selectors.video_source)
            .find_map(|source| attr_of(source, "src"))
            .and_then(|src| absolute_url(self.site, &src));
        match direct {
            Some(url) => LinkPlan::Direct(url),
            None => LinkPlan::Nothing,
        }
    }

    fn frame_url(&self, src: &str) -> Option<String> {
        match src.strip_prefix("//") {
            Some(rest) => Some(format!("https://{}", rest)),
            None => absolute_url(self.site, src),
        }
    }

    /// Emit streams for `plan` into `sink`
    ///
    /// Embeds are handed to `embeds` with the site root as referer and its
    /// answer is returned unchanged. `source` labels direct streams.
    pub async fn follow(
        &self,
        plan: LinkPlan,
        source: &str,
        embeds: &dyn EmbedExtractor,
        sink: &mut dyn LinkSink,
    ) -> Result<bool> {
        let referer = self.site.as_str();
        match plan {
            LinkPlan::Embed(url) => {
                debug!(url = %url, "Delegating embedded player");
                embeds.extract(&url, referer, sink).await
            }
            LinkPlan::Direct(url) => {
                info!(url = %url, "Found direct video");
                sink.stream(StreamDescriptor {
                    source: source.to_string(),
                    name: "Direct Video".to_string(),
                    url,
                    referer: referer.to_string(),
                    quality: Quality::Unknown,
                    is_hls: false,
                });
                Ok(true)
            }
            LinkPlan::Nothing => {
                debug!("No playable links on page");
                Ok(false)
            }
        }
    }
}
