use crate::error::ScrapeError;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;

pub const DEFAULT_UPSTREAM: &str = "https://vahanx.in";

const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Mobile Safari/537.36";
const REFERER: &str = "https://vahanx.in/";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Where and how the service fetches registration pages
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Scheme and host of the upstream site, without trailing path
    pub upstream_base: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { upstream_base: DEFAULT_UPSTREAM.to_string(), timeout: Duration::from_secs(10) }
    }
}

/// Fetches `/rc-search/<rc>` pages from the upstream site
#[derive(Clone)]
pub struct VahanxClient {
    client: Client,
    base: String,
}

impl VahanxClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ScrapeError> {
        let base = config.upstream_base.trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ScrapeError::InvalidUpstream(config.upstream_base.clone()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(header::REFERER, header::HeaderValue::from_static(REFERER));
        headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_static(ACCEPT_LANGUAGE));

        // gzip/brotli/deflate features make reqwest advertise and decode compressed bodies
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base })
    }

    pub fn page_url(&self, rc: &str) -> String {
        format!("{}/rc-search/{}", self.base, urlencoding::encode(rc))
    }

    /// Body of the registration page; the status code is not checked
    pub async fn fetch_page(&self, rc: &str) -> Result<String, ScrapeError> {
        let url = self.page_url(rc);
        log::debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            log::warn!("Upstream answered {} for {}", response.status(), url);
        }
        Ok(response.text().await?)
    }
}
