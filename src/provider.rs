//! Host-facing provider surface
//!
//! [`ContentProvider`] is the contract the host application drives;
//! [`AnikaiProvider`] implements it on top of the extractors in
//! [`crate::scrape`]. Pages are parsed in synchronous helpers so no parsed
//! document is held across an await.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::embed::{EmbedExtractor, LinkSink};
use crate::api::fetch::{HttpFetcher, PageFetcher};
use crate::config::{CategoryConfig, ProviderConfig};
use crate::error::AnikaiError;
use crate::models::{DetailRecord, HomePageList, MediaKind, SummaryRecord};
use crate::scrape::selectors::{absolute_url, join_site};
use crate::scrape::{DetailExtractor, LinkPlan, LinkResolver, ListingExtractor, SearchExtractor, Selectors};

const SUPPORTED_TYPES: [MediaKind; 2] = [MediaKind::Movie, MediaKind::Series];

/// A single-site content source as seen by the host
#[async_trait]
pub trait ContentProvider: Send + Sync {
    fn name(&self) -> &str;
    fn author(&self) -> &str;
    fn main_url(&self) -> &str;
    fn lang(&self) -> &str;
    fn supported_types(&self) -> &[MediaKind];

    /// Main page rows, in display order
    fn main_page(&self) -> &[CategoryConfig];

    /// One page of a named main page row
    async fn list_category(&self, name: &str, page: u32) -> Result<HomePageList>;

    async fn search(&self, query: &str) -> Result<Vec<SummaryRecord>>;

    /// `Ok(None)` when the page exists but is not a title page
    async fn load_detail(&self, url: &str) -> Result<Option<DetailRecord>>;

    /// Push streams and subtitles for a playable reference into `sink`
    ///
    /// Returns `true` if at least one stream was emitted.
    async fn resolve_links(&self, data_url: &str, sink: &mut dyn LinkSink) -> Result<bool>;
}

/// Provider for anikai.to
pub struct AnikaiProvider {
    config: ProviderConfig,
    site: Url,
    selectors: Selectors,
    fetcher: Arc<dyn PageFetcher>,
    embeds: Arc<dyn EmbedExtractor>,
}

impl AnikaiProvider {
    /// Create a provider with injected collaborators
    pub fn new(
        config: ProviderConfig,
        fetcher: Arc<dyn PageFetcher>,
        embeds: Arc<dyn EmbedExtractor>,
    ) -> Result<Self> {
        let site = config.site_url()?;
        let selectors = Selectors::new(&config.selectors)?;
        Ok(Self {
            config,
            site,
            selectors,
            fetcher,
            embeds,
        })
    }

    /// Create a provider backed by the default reqwest fetcher
    pub fn with_http(config: ProviderConfig, embeds: Arc<dyn EmbedExtractor>) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config)?);
        Self::new(config, fetcher, embeds)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Parsed site root
    pub fn site(&self) -> &Url {
        &self.site
    }

    /// Page URL for a category, falling back for unknown names
    pub fn category_url(&self, name: &str, page: u32) -> Result<Url> {
        let path = match self.config.category_path(name) {
            Some(path) => path,
            None => {
                warn!(category = %name, fallback = %self.config.fallback_path, "Unknown category");
                self.config.fallback_path.as_str()
            }
        };

        let mut url = self.join(path)?;
        if page > 1 {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    /// Search page URL for a query
    pub fn search_url(&self, query: &str) -> Result<Url> {
        self.join(&format!("search?keyword={}", urlencoding::encode(query)))
    }

    fn join(&self, path: &str) -> Result<Url> {
        join_site(&self.site, path).ok_or_else(|| AnikaiError::InvalidUrl(path.to_string()).into())
    }

    fn absolute(&self, url: &str) -> Result<String> {
        absolute_url(&self.site, url).ok_or_else(|| AnikaiError::InvalidUrl(url.to_string()).into())
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetcher
            .get(url)
            .await
            .with_context(|| format!("Failed to load {}", url))
    }

    // -------------------------------------------------------------------------
    // Synchronous parsing
    // -------------------------------------------------------------------------

    fn parse_listing(&self, markup: &str) -> Vec<SummaryRecord> {
        let document = Html::parse_document(markup);
        ListingExtractor::new(&self.selectors, &self.site).extract(&document)
    }

    fn parse_search(&self, markup: &str) -> Vec<SummaryRecord> {
        let document = Html::parse_document(markup);
        SearchExtractor::new(&self.selectors, &self.site).extract(&document)
    }

    fn parse_detail(&self, markup: &str, page_url: &str) -> Option<DetailRecord> {
        let document = Html::parse_document(markup);
        DetailExtractor::new(&self.selectors, &self.site).extract(&document, page_url)
    }

    fn plan_links(&self, markup: &str) -> LinkPlan {
        let document = Html::parse_document(markup);
        LinkResolver::new(&self.selectors, &self.site).plan(&document)
    }
}

#[async_trait]
impl ContentProvider for AnikaiProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn author(&self) -> &str {
        &self.config.author
    }

    fn main_url(&self) -> &str {
        &self.config.base_url
    }

    fn lang(&self) -> &str {
        &self.config.lang
    }

    fn supported_types(&self) -> &[MediaKind] {
        &SUPPORTED_TYPES
    }

    fn main_page(&self) -> &[CategoryConfig] {
        &self.config.categories
    }

    async fn list_category(&self, name: &str, page: u32) -> Result<HomePageList> {
        let url = self.category_url(name, page)?;
        let markup = self.fetch(url.as_str()).await?;
        let items = self.parse_listing(&markup);

        info!(category = %name, page, count = items.len(), "Listed category");
        Ok(HomePageList {
            name: name.to_string(),
            items,
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<SummaryRecord>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty search query");
            return Ok(Vec::new());
        }

        let url = self.search_url(query)?;
        let markup = self.fetch(url.as_str()).await?;
        let results = self.parse_search(&markup);

        info!(query = %query, count = results.len(), "Search complete");
        Ok(results)
    }

    async fn load_detail(&self, url: &str) -> Result<Option<DetailRecord>> {
        let url = self.absolute(url)?;
        let markup = self.fetch(&url).await?;
        let detail = self.parse_detail(&markup, &url);

        match &detail {
            Some(d) => info!(url = %url, kind = %d.kind(), episodes = d.episodes().len(), "Loaded detail"),
            None => debug!(url = %url, "No detail record on page"),
        }
        Ok(detail)
    }

    async fn resolve_links(&self, data_url: &str, sink: &mut dyn LinkSink) -> Result<bool> {
        let url = self.absolute(data_url)?;
        let markup = self.fetch(&url).await?;
        let plan = self.plan_links(&markup);

        let resolver = LinkResolver::new(&self.selectors, &self.site);
        resolver
            .follow(plan, &self.config.name, self.embeds.as_ref(), sink)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::embed::LinkCollector;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StaticPages {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for StaticPages {
        async fn get(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no page for {}", url))
        }
    }

    struct NoEmbeds;

    #[async_trait]
    impl EmbedExtractor for NoEmbeds {
        async fn extract(&self, _url: &str, _referer: &str, _sink: &mut dyn LinkSink) -> Result<bool> {
            Ok(false)
        }
    }

    fn provider(pages: &[(&str, &str)]) -> (AnikaiProvider, Arc<StaticPages>) {
        provider_with(ProviderConfig::default(), pages)
    }

    fn provider_with(
        config: ProviderConfig,
        pages: &[(&str, &str)],
    ) -> (AnikaiProvider, Arc<StaticPages>) {
        let fetcher = Arc::new(StaticPages {
            pages: pages
                .iter()
                .map(|(u, b)| (u.to_string(), b.to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        });
        let provider = AnikaiProvider::new(config, fetcher.clone(), Arc::new(NoEmbeds)).unwrap();
        (provider, fetcher)
    }

    #[test]
    fn test_metadata() {
        let (p, _) = provider(&[]);
        assert_eq!(p.name(), "Anikai");
        assert_eq!(p.author(), "hcgn2005-ai");
        assert_eq!(p.main_url(), "https://anikai.to");
        assert_eq!(p.lang(), "en");
        assert_eq!(p.supported_types(), &[MediaKind::Movie, MediaKind::Series]);

        let names: Vec<&str> = p.main_page().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Trending Anime", "Recently Updated", "Latest Releases", "Top Airing", "Popular Movies"]
        );
    }

    #[test]
    fn test_category_url() {
        let (p, _) = provider(&[]);
        assert_eq!(
            p.category_url("Top Airing", 1).unwrap().as_str(),
            "https://anikai.to/top-airing"
        );
        assert_eq!(
            p.category_url("Top Airing", 3).unwrap().as_str(),
            "https://anikai.to/top-airing?page=3"
        );
        assert_eq!(
            p.category_url("Something Else", 1).unwrap().as_str(),
            "https://anikai.to/latest"
        );
    }

    #[test]
    fn test_mirror_under_sub_path() {
        let base = "https://mirror.example/anikai";
        let config = ProviderConfig {
            base_url: base.to_string(),
            ..Default::default()
        };
        let (p, _) = provider_with(
            config,
            &[(
                "https://mirror.example/anikai/top-airing?page=2",
                r#"<div class="film_list-wrap"><div class="flw-item">
                     <div class="film-poster"><img data-src="/posters/x.jpg"></div>
                     <h3 class="film-name"><a href="/watch/x-1">X</a></h3>
                   </div></div>"#,
            )],
        );

        assert_eq!(
            p.category_url("Top Airing", 1).unwrap().as_str(),
            "https://mirror.example/anikai/top-airing"
        );
        assert_eq!(
            p.search_url("naruto").unwrap().as_str(),
            "https://mirror.example/anikai/search?keyword=naruto"
        );

        let list = tokio_test::block_on(p.list_category("Top Airing", 2)).unwrap();
        assert_eq!(list.items.len(), 1);
        assert!(list.items[0].url.starts_with(base));
        assert_eq!(list.items[0].url, "https://mirror.example/anikai/watch/x-1");
        assert_eq!(
            list.items[0].poster_url.as_deref(),
            Some("https://mirror.example/anikai/posters/x.jpg")
        );
    }

    #[test]
    fn test_search_url_is_encoded() {
        let (p, _) = provider(&[]);
        assert_eq!(
            p.search_url("one piece & co").unwrap().as_str(),
            "https://anikai.to/search?keyword=one%20piece%20%26%20co"
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProviderConfig {
            base_url: "nope".to_string(),
            ..Default::default()
        };
        let fetcher = Arc::new(StaticPages {
            pages: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        });
        assert!(AnikaiProvider::new(config, fetcher, Arc::new(NoEmbeds)).is_err());
    }

    #[test]
    fn test_blank_search_skips_fetch() {
        let (p, fetcher) = provider(&[]);
        let results = tokio_test::block_on(p.search("   ")).unwrap();
        assert!(results.is_empty());
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_category_keeps_requested_name() {
        let (p, fetcher) = provider(&[(
            "https://anikai.to/latest",
            r#"<div class="film_list-wrap"><div class="flw-item">
                 <h3 class="film-name"><a href="/watch/a-1">A</a></h3>
               </div></div>"#,
        )]);
        let list = tokio_test::block_on(p.list_category("Mystery Row", 1)).unwrap();

        assert_eq!(list.name, "Mystery Row");
        assert_eq!(list.items.len(), 1);
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec!["https://anikai.to/latest".to_string()]
        );
    }

    #[test]
    fn test_relative_detail_url() {
        let (p, _) = provider(&[(
            "https://anikai.to/watch/your-name-9",
            r#"<h1 class="heading-name">Your Name</h1>"#,
        )]);
        let detail = tokio_test::block_on(p.load_detail("/watch/your-name-9"))
            .unwrap()
            .unwrap();
        assert_eq!(detail.url, "https://anikai.to/watch/your-name-9");
        assert_eq!(detail.data_url(), Some("https://anikai.to/watch/your-name-9"));
    }

    #[test]
    fn test_links_with_nothing_playable() {
        let (p, _) = provider(&[("https://anikai.to/watch/a-1/ep-1", "<p>soon</p>")]);
        let mut sink = LinkCollector::new();
        let found =
            tokio_test::block_on(p.resolve_links("https://anikai.to/watch/a-1/ep-1", &mut sink)).unwrap();
        assert!(!found);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_fetch_error_propagates() {
        let (p, _) = provider(&[]);
        let err = tokio_test::block_on(p.load_detail("https://anikai.to/missing")).unwrap_err();
        assert!(err.to_string().contains("Failed to load https://anikai.to/missing"));
    }
}
