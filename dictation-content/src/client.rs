use std::time::Duration;

use tracing::{debug, info};

use crate::api::{ContentRequest, ContentResponse};
use crate::content::{article_id_from_url, Content};
use crate::error::{ContentError, Result};

/// Default upstream API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://mob2015.kekenet.com/keke/mobile/index.php";

/// Default base URL that `playurl` paths are relative to
pub const DEFAULT_AUDIO_BASE: &str = "https://k7.kekenet.com/";

/// HTTP client for the upstream content API
pub struct ContentClient {
    http: reqwest::Client,
    endpoint: String,
    audio_base: String,
}

impl ContentClient {
    pub fn new(endpoint: impl Into<String>, audio_base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            audio_base: audio_base.into(),
        })
    }

    /// Use a preconfigured HTTP client (proxy settings, custom TLS, tests)
    pub fn with_http_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        audio_base: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            audio_base: audio_base.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the content behind a page URL
    pub async fn fetch_page(&self, page_url: &str) -> Result<Content> {
        let article_id = article_id_from_url(page_url)?;
        self.fetch_article(article_id).await
    }

    /// Fetch one article by id
    pub async fn fetch_article(&self, article_id: u64) -> Result<Content> {
        info!("Fetching article {} from {}", article_id, self.endpoint);

        let form = ContentRequest::for_article(article_id).form_body()?;
        let response = self.http.post(&self.endpoint).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Upstream response: {} bytes", body.len());

        let parsed: ContentResponse = serde_json::from_str(&body)?;
        Content::from_response(article_id, &parsed, &self.audio_base)
    }
}

impl Default for ContentClient {
    fn default() -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            audio_base: DEFAULT_AUDIO_BASE.to_string(),
        }
    }
}
