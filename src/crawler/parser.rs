//! Link extraction and page titles
//!
//! `LinkExtractor` is the seam between fetched content and the traversal:
//! one implementation per content format. `HtmlLinkExtractor` handles
//! MediaWiki-style HTML pages.

use crate::config::SiteConfig;
use crate::crawler::filter::LinkFilter;
use crate::url::{title_from_url, PageId};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Turns fetched page content into traversable outbound links
pub trait LinkExtractor: Send + Sync {
    /// Ordered, deduplicated, traversable links found in `content`
    ///
    /// Relative links are resolved against `source_url`. Unparseable content
    /// yields an empty list.
    fn extract(&self, content: &str, source_url: &Url) -> Vec<PageId>;

    /// Human-readable title of fetched content, falling back to the URL
    fn title_of(&self, content: &str, url: &Url) -> String;

    /// Title for a page that has only been discovered, not fetched
    fn title_from_url(&self, url: &Url) -> String;
}

/// Extracts article links from the primary content region of HTML pages
///
/// # Link Extraction Rules
///
/// - Only `<a href>` elements inside the content region are considered; when
///   the page has no such region the whole document is used
/// - `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only hrefs are skipped
/// - Every surviving href is resolved and run through [`LinkFilter`]
/// - Order of first appearance is kept; repeats are dropped
/// - The target, if linked, is moved to the front
#[derive(Debug)]
pub struct HtmlLinkExtractor {
    filter: LinkFilter,
    content_selector: Selector,
    title_selector: Selector,
    anchor_selector: Selector,
    document_title_selector: Selector,
    article_prefix: String,
    target: Option<PageId>,
}

impl HtmlLinkExtractor {
    /// Builds an extractor for a site, prioritizing links to `target`
    pub fn from_site(site: &SiteConfig, target: Option<PageId>) -> Result<Self, ConfigError> {
        Ok(Self {
            filter: LinkFilter::from_site(site)?,
            content_selector: parse_selector(&site.content_selector)?,
            title_selector: parse_selector(&site.title_selector)?,
            anchor_selector: parse_selector("a[href]")?,
            document_title_selector: parse_selector("title")?,
            article_prefix: site.article_prefix.clone(),
            target,
        })
    }

    pub fn filter(&self) -> &LinkFilter {
        &self.filter
    }

    fn collect_links(&self, region: ElementRef<'_>, source_url: &Url) -> Vec<PageId> {
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in region.select(&self.anchor_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(absolute) = resolve_link(href, source_url) else {
                continue;
            };
            if !self.filter.is_traversable(&absolute) {
                continue;
            }
            let Ok(id) = PageId::from_url(&absolute) else {
                continue;
            };
            if seen.insert(id.clone()) {
                links.push(id);
            }
        }

        links
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, content: &str, source_url: &Url) -> Vec<PageId> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(content);
        let region = document
            .select(&self.content_selector)
            .next()
            .unwrap_or_else(|| document.root_element());

        let mut links = self.collect_links(region, source_url);

        if let Some(target) = &self.target {
            prioritize(&mut links, target);
        }

        links
    }

    fn title_of(&self, content: &str, url: &Url) -> String {
        let document = Html::parse_document(content);

        [&self.title_selector, &self.document_title_selector]
            .into_iter()
            .find_map(|selector| first_text(&document, selector))
            .unwrap_or_else(|| self.title_from_url(url))
    }

    fn title_from_url(&self, url: &Url) -> String {
        title_from_url(url, &self.article_prefix)
    }
}

/// Moves `target` to the front of `links`, keeping the rest in order
pub fn prioritize(links: &mut Vec<PageId>, target: &PageId) {
    if let Some(pos) = links.iter().position(|id| id == target) {
        let id = links.remove(pos);
        links.insert(0, id);
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| {
        ConfigError::InvalidPattern(format!("Invalid CSS selector '{}': {:?}", selector, e))
    })
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|s| !s.is_empty())
}

/// Resolves an href against the page it was found on
///
/// Returns None for empty hrefs, fragment-only anchors, non-navigational
/// schemes and anything that does not resolve.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    base_url.join(href).ok()
}
