use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::config::SearchSettings;

use super::{RawSearchItem, SearchBackend, SearchError};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Scrapes the DuckDuckGo HTML results page.
#[derive(Debug, Clone)]
pub struct DuckDuckGoBackend {
    http: Client,
    base_url: String,
}

impl DuckDuckGoBackend {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(SearchError::Build)?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoBackend {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn text_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchItem>, SearchError> {
        let url = format!("{}/html/", self.base_url);
        let response = self
            .http
            .post(url)
            .form(&[("q", query)])
            .header("Accept", "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.text().await?;
        parse_results(&body, max_results)
    }
}

/// `Html` is not `Send`, so parsing stays in a synchronous function.
fn parse_results(html: &str, max_results: usize) -> Result<Vec<RawSearchItem>, SearchError> {
    let document = Html::parse_document(html);
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let items = document
        .select(&result_sel)
        .filter_map(|result| {
            let link = result.select(&link_sel).next()?;
            let title = collapse_whitespace(&link.text().collect::<String>());
            if title.is_empty() {
                return None;
            }

            let href = link.value().attr("href").map(unwrap_redirect);
            let body = result
                .select(&snippet_sel)
                .next()
                .map(|snippet| collapse_whitespace(&snippet.text().collect::<String>()));

            Some(RawSearchItem {
                title: Some(title),
                href,
                body,
            })
        })
        .take(max_results)
        .collect();

    Ok(items)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|err| SearchError::Parse(format!("invalid selector {css}: {err}")))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Result links are often wrapped as `//duckduckgo.com/l/?uddg=<encoded>&rut=...`.
fn unwrap_redirect(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + "uddg=".len();
        let end = href[start..]
            .find('&')
            .map(|offset| start + offset)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded).decode_utf8_lossy().into_owned();
        }
    }
    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const SAMPLE_PAGE: &str = r##"
        <html><body>
          <div class="result results_links">
            <h2 class="result__title">
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fsql-course&amp;rut=abc">
                SQL Fundamentals <b>Course</b>
              </a>
            </h2>
            <a class="result__snippet" href="#">Learn   joins and
              window functions.</a>
          </div>
          <div class="result results_links">
            <h2 class="result__title">
              <a class="result__a" href="https://example.org/blog">Why data pipelines fail</a>
            </h2>
          </div>
          <div class="result results_links">
            <h2 class="result__title"><a class="result__a" href="https://example.net">   </a></h2>
          </div>
          <div class="result results_links">
            <h2 class="result__title"><a class="result__a" href="https://example.io/spark">Spark Tutorial</a></h2>
            <div class="result__snippet">Batch and streaming.</div>
          </div>
        </body></html>
    "##;

    #[test]
    fn parse_results_extracts_title_link_and_snippet() {
        let items = parse_results(SAMPLE_PAGE, 10).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title.as_deref(), Some("SQL Fundamentals Course"));
        assert_eq!(items[0].href.as_deref(), Some("https://example.com/sql-course"));
        assert_eq!(
            items[0].body.as_deref(),
            Some("Learn joins and window functions.")
        );
        assert_eq!(items[1].title.as_deref(), Some("Why data pipelines fail"));
        assert_eq!(items[1].body, None);
        assert_eq!(items[2].body.as_deref(), Some("Batch and streaming."));
    }

    #[test]
    fn parse_results_respects_limit() {
        let items = parse_results(SAMPLE_PAGE, 1).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn unwrap_redirect_passes_plain_links_through() {
        assert_eq!(unwrap_redirect("https://example.com/a"), "https://example.com/a");
        assert_eq!(
            unwrap_redirect("//duckduckgo.com/l/?uddg=https%3A%2F%2Fx.dev%2F%3Fq%3D1"),
            "https://x.dev/?q=1"
        );
    }

    #[tokio::test]
    async fn text_search_posts_query_form() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/html/")
                    .body_contains("q=best+data+engineering+online+course");
                then.status(200)
                    .header("Content-Type", "text/html")
                    .body(SAMPLE_PAGE);
            })
            .await;

        let settings = SearchSettings {
            base_url: server.base_url(),
            ..SearchSettings::default()
        };
        let backend = DuckDuckGoBackend::new(&settings).unwrap();

        let items = backend
            .text_search("best data engineering online course", 5)
            .await
            .unwrap();

        assert_eq!(items.len(), 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn text_search_reports_http_status() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/html/");
                then.status(503);
            })
            .await;

        let settings = SearchSettings {
            base_url: server.base_url(),
            ..SearchSettings::default()
        };
        let backend = DuckDuckGoBackend::new(&settings).unwrap();

        let err = backend.text_search("anything", 5).await.unwrap_err();
        assert!(matches!(err, SearchError::Status(status) if status.as_u16() == 503));
    }
}
