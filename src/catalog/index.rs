//! Remote package index fetching.
//!
//! The index service lists every published project. Servers that speak the
//! JSON simple API (`application/vnd.pypi.simple.v1+json`) answer with a
//! `projects` array; older mirrors return an HTML page with one anchor per
//! project. Both forms are accepted.

use anyhow::{bail, Result};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>([^<]*)</a>").unwrap());

/// Accept header preferring the JSON form.
const ACCEPT_INDEX: &str = "application/vnd.pypi.simple.v1+json, text/html;q=0.1";

/// A source of published project names.
pub trait IndexSource {
    /// Fetch every project name the index lists.
    fn fetch(&self) -> Result<Vec<String>>;
}

impl<F> IndexSource for F
where
    F: Fn() -> Result<Vec<String>>,
{
    fn fetch(&self) -> Result<Vec<String>> {
        self()
    }
}

/// An index that is never contacted.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineIndex;

impl IndexSource for OfflineIndex {
    fn fetch(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Fetches the project list over HTTP/HTTPS.
#[derive(Debug, Clone)]
pub struct HttpIndex {
    url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SimpleIndex {
    projects: Vec<SimpleProject>,
}

#[derive(Debug, Deserialize)]
struct SimpleProject {
    name: String,
}

impl HttpIndex {
    /// Create a fetcher with the default 30-second timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    /// Index URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl IndexSource for HttpIndex {
    fn fetch(&self) -> Result<Vec<String>> {
        let client = Client::builder()
            .user_agent(concat!("superpip/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()?;

        let response = client.get(&self.url).header(ACCEPT, ACCEPT_INDEX).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), self.url);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));

        let body = response.text()?;
        if is_json {
            parse_json_index(&body)
        } else {
            parse_html_index(&body)
        }
    }
}

/// Parse the JSON simple API form.
pub fn parse_json_index(body: &str) -> Result<Vec<String>> {
    let index: SimpleIndex = serde_json::from_str(body)?;
    Ok(index.projects.into_iter().map(|p| p.name).collect())
}

/// Parse the HTML simple API form: one anchor per project.
pub fn parse_html_index(body: &str) -> Result<Vec<String>> {
    Ok(ANCHOR_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const HTML_INDEX: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Simple index</title></head>
  <body>
    <a href="/simple/requests/">requests</a>
    <a href="/simple/zope-interface/">zope.interface</a>
    <a href="/simple/numpy/">NumPy</a>
  </body>
</html>"#;

    #[test]
    fn default_timeout_is_30_seconds() {
        let index = HttpIndex::new("https://example.com/simple/");
        assert_eq!(index.timeout(), Duration::from_secs(30));
        assert_eq!(index.url(), "https://example.com/simple/");
    }

    #[test]
    fn parses_html_anchors() {
        let names = parse_html_index(HTML_INDEX).unwrap();
        assert_eq!(names, vec!["requests", "zope.interface", "NumPy"]);
    }

    #[test]
    fn parses_json_projects() {
        let body = r#"{"meta":{"api-version":"1.1"},"projects":[{"name":"requests"},{"name":"Flask"}]}"#;
        let names = parse_json_index(body).unwrap();
        assert_eq!(names, vec!["requests", "Flask"]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_json_index("{not json").is_err());
    }

    #[test]
    fn offline_index_is_empty() {
        assert!(OfflineIndex.fetch().unwrap().is_empty());
    }

    #[test]
    fn closures_are_index_sources() {
        let source = || -> Result<Vec<String>> { Ok(vec!["a".to_string()]) };
        assert_eq!(source.fetch().unwrap(), vec!["a"]);
    }

    #[test]
    fn fetches_html_index_over_http() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/simple/");
            then.status(200)
                .header("content-type", "text/html")
                .body(HTML_INDEX);
        });

        let index = HttpIndex::new(server.url("/simple/"));
        let names = index.fetch().unwrap();

        mock.assert();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn fetches_json_index_over_http() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/simple/");
            then.status(200)
                .header("content-type", "application/vnd.pypi.simple.v1+json")
                .body(r#"{"projects":[{"name":"httpx"}]}"#);
        });

        let names = HttpIndex::new(server.url("/simple/")).fetch().unwrap();
        assert_eq!(names, vec!["httpx"]);
    }

    #[test]
    fn http_error_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/simple/");
            then.status(503);
        });

        let err = HttpIndex::new(server.url("/simple/")).fetch().unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
