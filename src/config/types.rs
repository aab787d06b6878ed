use serde::Deserialize;

/// Main configuration structure for Sumi-Degrees
///
/// Every section is optional; an empty file yields `Config::default()`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub site: SiteConfig,
    pub traversal: TraversalConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of hops from the start page (inclusive)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "concurrency-width")]
    pub concurrency_width: u32,

    /// Per-fetch timeout in seconds
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Number of fetched pages between progress log lines
    #[serde(rename = "progress-interval")]
    pub progress_interval: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            concurrency_width: 8,
            fetch_timeout_secs: 30,
            progress_interval: 25,
        }
    }
}

/// Description of the site being traversed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that page names are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path prefix shared by every article page (e.g. "/wiki/")
    #[serde(rename = "article-prefix")]
    pub article_prefix: String,

    /// Host patterns links must stay within. Empty means the host of `base_url`.
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// CSS selector for the primary content region
    #[serde(rename = "content-selector")]
    pub content_selector: String,

    /// CSS selector for the page heading
    #[serde(rename = "title-selector")]
    pub title_selector: String,

    /// Regexes matched against the page-name portion of a link; a match skips the link
    #[serde(rename = "skip-patterns")]
    pub skip_patterns: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            article_prefix: "/wiki/".to_string(),
            allowed_domains: Vec::new(),
            content_selector: "div#mw-content-text".to_string(),
            title_selector: "h1#firstHeading".to_string(),
            skip_patterns: vec![
                r"_\(identifier\)$".to_string(),
                r"^\d+$".to_string(),
                "List_of_".to_string(),
            ],
        }
    }
}

/// Start and target of a traversal run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Page name or absolute URL to start from
    pub start: String,

    /// Page name or absolute URL to reach
    pub target: String,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            start: "Special:Random".to_string(),
            target: "Kevin Bacon".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiDegrees".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the JSON report; `None` prints to the console only
    #[serde(rename = "result-path")]
    pub result_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            result_path: Some("output.json".to_string()),
        }
    }
}
