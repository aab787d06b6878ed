use crate::config::SiteConfig;
use crate::url::PageId;
use crate::ConfigError;
use url::Url;

/// Title used when a URL carries no recognizable page name
pub const UNKNOWN_TITLE: &str = "Unknown Page";

/// Resolves a start/target identifier into a page identity
///
/// An identifier containing `://` is taken as an absolute URL. Anything else
/// is a page name, joined onto the site's base URL and article prefix with
/// spaces replaced by underscores (`"Kevin Bacon"` becomes
/// `https://en.wikipedia.org/wiki/Kevin_Bacon`).
///
/// # Examples
///
/// ```
/// use sumi_degrees::config::SiteConfig;
/// use sumi_degrees::url::resolve_identifier;
///
/// let id = resolve_identifier("Kevin Bacon", &SiteConfig::default()).unwrap();
/// assert_eq!(id.as_str(), "https://en.wikipedia.org/wiki/Kevin_Bacon");
/// ```
pub fn resolve_identifier(identifier: &str, site: &SiteConfig) -> Result<PageId, ConfigError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(ConfigError::UnresolvableIdentifier(identifier.to_string()));
    }

    let raw = if identifier.contains("://") {
        identifier.to_string()
    } else {
        let base = Url::parse(&site.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;
        let path = format!("{}{}", site.article_prefix, identifier.replace(' ', "_"));
        base.join(&path)
            .map_err(|_| ConfigError::UnresolvableIdentifier(identifier.to_string()))?
            .to_string()
    };

    PageId::parse(&raw).map_err(|_| ConfigError::UnresolvableIdentifier(identifier.to_string()))
}

/// Returns the page-name portion of a URL (the path after the article prefix)
///
/// The name is returned still percent-encoded, exactly as it appears in the path.
pub fn page_name<'a>(url: &'a Url, article_prefix: &str) -> Option<&'a str> {
    url.path()
        .strip_prefix(article_prefix)
        .filter(|name| !name.is_empty())
}

/// Derives a human-readable title from a URL
///
/// `/wiki/Kevin_Bacon` becomes `Kevin Bacon`; percent escapes are decoded.
/// URLs outside the article prefix get [`UNKNOWN_TITLE`].
pub fn title_from_url(url: &Url, article_prefix: &str) -> String {
    let Some(name) = page_name(url, article_prefix) else {
        return UNKNOWN_TITLE.to_string();
    };

    match urlencoding::decode(name) {
        Ok(decoded) => decoded.replace('_', " "),
        Err(_) => UNKNOWN_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::default()
    }

    #[test]
    fn test_resolve_page_name() {
        let id = resolve_identifier("Albert Einstein", &site()).unwrap();
        assert_eq!(id.as_str(), "https://en.wikipedia.org/wiki/Albert_Einstein");
    }

    #[test]
    fn test_resolve_absolute_url() {
        let id = resolve_identifier("https://EN.wikipedia.org/wiki/Kevin_Bacon/", &site()).unwrap();
        assert_eq!(id.as_str(), "https://en.wikipedia.org/wiki/Kevin_Bacon");
    }

    #[test]
    fn test_name_and_url_resolve_to_same_identity() {
        let by_name = resolve_identifier("Kevin Bacon", &site()).unwrap();
        let by_url =
            resolve_identifier("https://en.wikipedia.org/wiki/Kevin_Bacon", &site()).unwrap();
        assert_eq!(by_name, by_url);
    }

    #[test]
    fn test_resolve_special_page() {
        let id = resolve_identifier("Special:Random", &site()).unwrap();
        assert_eq!(id.as_str(), "https://en.wikipedia.org/wiki/Special:Random");
    }

    #[test]
    fn test_resolve_empty_identifier() {
        assert!(matches!(
            resolve_identifier("  ", &site()),
            Err(ConfigError::UnresolvableIdentifier(_))
        ));
    }

    #[test]
    fn test_resolve_bad_absolute_url() {
        assert!(matches!(
            resolve_identifier("ftp://example.com/file", &site()),
            Err(ConfigError::UnresolvableIdentifier(_))
        ));
    }

    #[test]
    fn test_title_from_url() {
        let url = Url::parse("https://en.wikipedia.org/wiki/Kevin_Bacon").unwrap();
        assert_eq!(title_from_url(&url, "/wiki/"), "Kevin Bacon");
    }

    #[test]
    fn test_title_from_url_decodes_escapes() {
        let url = Url::parse("https://en.wikipedia.org/wiki/Caf%C3%A9_au_lait").unwrap();
        assert_eq!(title_from_url(&url, "/wiki/"), "Café au lait");
    }

    #[test]
    fn test_title_from_url_outside_prefix() {
        let url = Url::parse("https://en.wikipedia.org/w/index.php").unwrap();
        assert_eq!(title_from_url(&url, "/wiki/"), UNKNOWN_TITLE);

        let url = Url::parse("https://en.wikipedia.org/wiki/").unwrap();
        assert_eq!(title_from_url(&url, "/wiki/"), UNKNOWN_TITLE);
    }
}
