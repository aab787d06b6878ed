//! Integration tests for sumi-degrees
//!
//! These tests use wiremock to serve a small mock wiki over HTTP.

mod crawl_tests;
mod fetch_tests;
mod support;
