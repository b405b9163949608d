use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::feed::tags;

const USER_AGENT_STRING: &str = "Mozilla/5.0 (compatible; post-wizard/1.0)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedContent {
    pub title: String,
    pub description: String,
    pub url: String,
}

pub struct ContentFetcher {
    client: Client,
}

impl ContentFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetch a page and pull a title and description out of its markup.
    pub async fn extract(&self, page_url: &str) -> Result<ExtractedContent> {
        let url = validate_url(page_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));

        let response = self
            .client
            .get(url.as_str())
            .headers(headers)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Failed to fetch {}: {}", page_url, response.status());
            return Err(AppError::UpstreamStatus {
                status: response.status().as_u16(),
                body: format!("Failed to fetch {}", page_url),
            });
        }

        let html = response.text().await?;
        tracing::debug!("Fetched {} bytes from {}", html.len(), page_url);

        summarize_page(&html, page_url.trim())
    }
}

pub fn validate_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::InvalidInput("URL is required".to_string()));
    }

    let url =
        Url::parse(raw).map_err(|_| AppError::InvalidInput("Invalid URL format".to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::InvalidInput("Invalid URL format".to_string()));
    }

    Ok(url)
}

fn summarize_page(html: &str, url: &str) -> Result<ExtractedContent> {
    let page = tags::scan_page(html);

    if page.title.is_none() && page.description.is_none() {
        return Err(AppError::InvalidInput(
            "Could not extract title or description from the provided URL".to_string(),
        ));
    }

    Ok(ExtractedContent {
        title: page.title.unwrap_or_else(|| "Untitled Article".to_string()),
        description: page
            .description
            .unwrap_or_else(|| "No description available".to_string()),
        url: url.to_string(),
    })
}
