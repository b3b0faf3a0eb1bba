//! Web search collaborator.
//!
//! Search is best-effort: any failure here degrades the run to an empty
//! context block instead of aborting it. The trait seam exists so the
//! pipeline can be driven by a mock in tests.

use crate::log_debug;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Search collaborator interface: query + result cap in, ranked snippets out.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebResult>>;
}

/// DuckDuckGo's HTML endpoint, scraped with regexes. No API key required.
pub struct DuckDuckGo {
    client: reqwest::Client,
}

static RESULT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a[^>]*class="result__a"[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#)
        .expect("result link regex is valid")
});

static RESULT_SNIPPET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a[^>]*class="result__snippet"[^>]*>(.*?)</a>"#)
        .expect("result snippet regex is valid")
});

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag regex is valid"));

impl DuckDuckGo {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("autodeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebResult>> {
        log_debug!("Searching DuckDuckGo for: {query}");

        let response = self
            .client
            .get("https://html.duckduckgo.com/html/")
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("search returned HTTP {}", response.status()));
        }

        let body = response.text().await?;
        Ok(parse_results(&body, max_results))
    }
}

/// Pulls (title, url) and snippet pairs out of the result page HTML.
/// Positional pairing is good enough here; a missing snippet becomes an
/// empty string rather than shifting the rest.
fn parse_results(body: &str, max_results: usize) -> Vec<WebResult> {
    let snippets: Vec<String> = RESULT_SNIPPET
        .captures_iter(body)
        .map(|cap| strip_html(&cap[1]))
        .collect();

    RESULT_LINK
        .captures_iter(body)
        .take(max_results)
        .enumerate()
        .filter_map(|(i, cap)| {
            let url = decode_entities(&cap[1]);
            let title = strip_html(&cap[2]);
            let snippet = snippets.get(i).cloned().unwrap_or_default();
            if title.is_empty() && snippet.is_empty() {
                None
            } else {
                Some(WebResult {
                    title,
                    snippet,
                    url,
                })
            }
        })
        .collect()
}

fn strip_html(fragment: &str) -> String {
    decode_entities(HTML_TAG.replace_all(fragment, "").trim())
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
}
