//! Mock wiki shared by the integration tests

use sumi_degrees::config::{Config, SiteConfig, TraversalConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a MediaWiki-shaped article linking to `links`
pub fn article(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<li><a href="/wiki/{}">{}</a></li>"#, link, link.replace('_', " ")))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{title} - Mock Wiki</title></head>
<body>
<div id="mw-navigation"><a href="/wiki/Main_Page">Main page</a><a href="/wiki/Special:Random">Random</a></div>
<h1 id="firstHeading">{title}</h1>
<div id="mw-content-text"><ul>{anchors}</ul></div>
</body></html>"#,
        title = title,
        anchors = anchors
    )
}

/// Serves `/wiki/<name>` as an article titled after the name
pub async fn mount_article(server: &MockServer, name: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", name)))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(article(&name.replace('_', " "), links), "text/html"),
        )
        .mount(server)
        .await;
}

/// Serves `/wiki/<from>` as a permanent redirect to `/wiki/<to>`
pub async fn mount_redirect(server: &MockServer, from: &str, to: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", from)))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("/wiki/{}", to).as_str()),
        )
        .mount(server)
        .await;
}

/// Configuration pointing at the mock server
pub fn wiki_config(server: &MockServer, start: &str, target: &str, max_depth: u32) -> Config {
    let mut config = Config {
        site: SiteConfig {
            base_url: server.uri(),
            ..SiteConfig::default()
        },
        traversal: TraversalConfig {
            start: start.to_string(),
            target: target.to_string(),
        },
        ..Config::default()
    };
    config.crawler.max_depth = max_depth;
    config.crawler.concurrency_width = 4;
    config.crawler.fetch_timeout_secs = 5;
    config
}
