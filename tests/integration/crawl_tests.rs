//! Integration tests for the crawler
//!
//! These tests run the full traversal over HTTP against a mock wiki and check
//! the found path, the failure outcomes and the written report.

use crate::support::{mount_article, mount_redirect, wiki_config};
use chrono::Utc;
use std::io::Write;
use sumi_degrees::config::load_config;
use sumi_degrees::output::{write_json_report, RunReport};
use sumi_degrees::{Crawler, DegreesError, TraversalOutcome};
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_finds_shortest_path_over_http() {
    let mock_server = MockServer::start().await;
    mount_article(&mock_server, "Footloose", &["John_Lithgow", "Lori_Singer"]).await;
    mount_article(&mock_server, "John_Lithgow", &["Harry_and_the_Hendersons"]).await;
    mount_article(&mock_server, "Lori_Singer", &["Kevin_Bacon"]).await;
    mount_article(&mock_server, "Harry_and_the_Hendersons", &["Kevin_Bacon"]).await;

    let config = wiki_config(&mock_server, "Footloose", "Kevin Bacon", 6);
    let result = Crawler::from_config(&config)
        .expect("Failed to build crawler")
        .run()
        .await
        .expect("Traversal should complete");

    assert!(result.success);
    assert_eq!(result.path, vec!["Footloose", "Lori Singer", "Kevin Bacon"]);
    assert_eq!(result.degrees, 2);
    assert_eq!(result.outcome, TraversalOutcome::Found);
}

#[tokio::test]
async fn test_navigation_links_are_ignored() {
    // Main_Page links straight to the target but only appears in the navigation
    let mock_server = MockServer::start().await;
    mount_article(&mock_server, "Footloose", &["Lori_Singer"]).await;
    mount_article(&mock_server, "Main_Page", &["Kevin_Bacon"]).await;
    mount_article(&mock_server, "Lori_Singer", &[]).await;

    let config = wiki_config(&mock_server, "Footloose", "Kevin Bacon", 4);
    let result = Crawler::from_config(&config).unwrap().run().await.unwrap();

    assert!(!result.success);
    assert_eq!(result.outcome, TraversalOutcome::Exhausted);
    assert_eq!(result.stats.pages_fetched, 2);
}

#[tokio::test]
async fn test_missing_pages_are_dead_ends() {
    let mock_server = MockServer::start().await;
    mount_article(&mock_server, "Footloose", &["Deleted_Article", "Lori_Singer"]).await;
    mount_article(&mock_server, "Lori_Singer", &["Dianne_Wiest"]).await;
    mount_article(&mock_server, "Dianne_Wiest", &["Kevin_Bacon"]).await;

    let config = wiki_config(&mock_server, "Footloose", "Kevin Bacon", 6);
    let result = Crawler::from_config(&config).unwrap().run().await.unwrap();

    assert_eq!(
        result.path,
        vec!["Footloose", "Lori Singer", "Dianne Wiest", "Kevin Bacon"]
    );
    assert_eq!(result.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_depth_cap_reported() {
    let mock_server = MockServer::start().await;
    mount_article(&mock_server, "Footloose", &["Lori_Singer"]).await;
    mount_article(&mock_server, "Lori_Singer", &["Dianne_Wiest"]).await;
    mount_article(&mock_server, "Dianne_Wiest", &["Kevin_Bacon"]).await;

    let config = wiki_config(&mock_server, "Footloose", "Kevin Bacon", 2);
    let result = Crawler::from_config(&config).unwrap().run().await.unwrap();

    assert!(!result.success);
    assert_eq!(result.outcome, TraversalOutcome::Exhausted);
    assert_eq!(result.stats.links_beyond_depth, 1);
    assert_eq!(result.degrees, -1);
    assert_eq!(
        result.message.as_deref(),
        Some("Could not find a path from 'Footloose' to 'Kevin Bacon' within 2 steps.")
    );
}

#[tokio::test]
async fn test_random_start_redirect() {
    // The start page is keyed by where the redirect lands
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Special:Random"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/wiki/Footloose"))
        .mount(&mock_server)
        .await;
    mount_article(&mock_server, "Footloose", &["Kevin_Bacon"]).await;

    let config = wiki_config(&mock_server, "Special:Random", "Kevin Bacon", 3);
    let result = Crawler::from_config(&config).unwrap().run().await.unwrap();

    assert_eq!(result.path, vec!["Footloose", "Kevin Bacon"]);
    assert_eq!(result.degrees, 1);
}

#[tokio::test]
async fn test_redirect_onto_target() {
    let mock_server = MockServer::start().await;
    mount_article(&mock_server, "Footloose", &["Bacon"]).await;
    mount_redirect(&mock_server, "Bacon", "Kevin_Bacon").await;
    mount_article(&mock_server, "Kevin_Bacon", &[]).await;

    let config = wiki_config(&mock_server, "Footloose", "Kevin Bacon", 3);
    let result = Crawler::from_config(&config).unwrap().run().await.unwrap();

    assert!(result.success);
    assert_eq!(result.path, vec!["Footloose", "Kevin Bacon"]);
    assert_eq!(result.degrees, 1);
}

#[tokio::test]
async fn test_unreachable_start_is_error() {
    let mock_server = MockServer::start().await;

    let config = wiki_config(&mock_server, "Nowhere", "Kevin Bacon", 3);
    let result = Crawler::from_config(&config).unwrap().run().await;

    match result {
        Err(DegreesError::StartPage { url, .. }) => assert!(url.ends_with("/wiki/Nowhere")),
        other => panic!("Expected StartPage error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_config_file_to_json_report() {
    let mock_server = MockServer::start().await;
    mount_article(&mock_server, "Footloose", &["Kevin_Bacon"]).await;

    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("output.json");

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[crawler]
max-depth = 3
concurrency-width = 2

[site]
base-url = "{}"

[traversal]
start = "Footloose"
target = "Kevin Bacon"

[output]
result-path = "{}"
"#,
        mock_server.uri(),
        report_path.display()
    )
    .unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).expect("Config should load");
    let started_at = Utc::now();
    let result = Crawler::from_config(&config).unwrap().run().await.unwrap();
    let report = RunReport::new(
        config.traversal.start.clone(),
        config.traversal.target.clone(),
        started_at,
        result,
    );

    let output_path = config.output.result_path.as_deref().unwrap();
    write_json_report(&report, std::path::Path::new(output_path)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["degrees"], 1);
    assert_eq!(json["path"][1], "Kevin Bacon");
    assert_eq!(json["start"], "Footloose");
}
