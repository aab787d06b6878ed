use crate::UrlError;
use url::Url;

/// Query parameters that never change which page is served
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "ref", "source"];

/// Normalizes a link into the canonical form used for page identity
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Accept only HTTP and HTTPS schemes (scheme case is folded by parsing)
/// 3. Lowercase the host
/// 4. Normalize path:
///    - Remove dot segments (. and ..) and empty segments
///    - Remove trailing slash (except for root /)
///    - Empty path becomes /
/// 5. Remove fragment (everything after #)
/// 6. Remove tracking query parameters, sort the rest, drop an empty query
///
/// The scheme is kept as-is so that the identity stays fetchable.
///
/// # Examples
///
/// ```
/// use sumi_degrees::url::normalize_url;
///
/// let url = normalize_url("HTTPS://EN.Wikipedia.ORG/wiki/Kevin_Bacon/#Career").unwrap();
/// assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/Kevin_Bacon");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or(UrlError::MissingDomain)?;
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Malformed(format!("Failed to set host: {}", e)))?;

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.set_fragment(None);

    if url.query().is_some() {
        let params = filter_and_sort_query_params(&url);
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    Ok(url)
}

/// Removes dot segments, empty segments and the trailing slash from a path
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}

fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    params.sort();
    params
}

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_is_preserved() {
        let result = normalize_url("http://example.com/page").unwrap();
        assert_eq!(result.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_scheme_and_host_case_folded() {
        let result = normalize_url("HTTPS://EN.WIKIPEDIA.ORG/wiki/Kevin_Bacon").unwrap();
        assert_eq!(result.as_str(), "https://en.wikipedia.org/wiki/Kevin_Bacon");
    }

    #[test]
    fn test_path_case_is_significant() {
        let a = normalize_url("https://en.wikipedia.org/wiki/Bacon").unwrap();
        let b = normalize_url("https://en.wikipedia.org/wiki/bacon").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_trailing_slash() {
        let result = normalize_url("https://example.com/page/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_keep_root_slash() {
        let result = normalize_url("https://example.com/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");

        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_remove_fragment() {
        let result = normalize_url("https://example.com/wiki/A#History").unwrap();
        assert_eq!(result.as_str(), "https://example.com/wiki/A");
    }

    #[test]
    fn test_query_cleanup() {
        let result =
            normalize_url("https://example.com/page?utm_source=x&b=2&fbclid=y&a=1").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?a=1&b=2");

        let result = normalize_url("https://example.com/page?utm_medium=email").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_dot_and_empty_segments() {
        let result = normalize_url("https://example.com//a/../wiki/./B").unwrap();
        assert_eq!(result.as_str(), "https://example.com/wiki/B");

        let result = normalize_url("https://example.com/../page").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_percent_encoding_preserved() {
        let result = normalize_url("https://en.wikipedia.org/wiki/Caf%C3%A9").unwrap();
        assert_eq!(result.as_str(), "https://en.wikipedia.org/wiki/Caf%C3%A9");
    }

    #[test]
    fn test_deterministic() {
        let raw = "https://Example.com/wiki/A/?b=1&a=2#x";
        assert_eq!(normalize_url(raw).unwrap(), normalize_url(raw).unwrap());
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://example.com/page");
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_malformed_url() {
        assert!(matches!(
            normalize_url("not a url").unwrap_err(),
            UrlError::Parse(_)
        ));
    }
}
