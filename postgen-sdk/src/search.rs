// ABOUTME: Blog-search client for the Naver open API
// ABOUTME: Fetches reference material and condenses it into a digest for post drafting

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::builder::BlogSearchClientConfig;
use crate::constants::{search, urls};
use crate::error::SdkError;
use crate::retry::{RetryConfig, retry_with_backoff};
use crate::Result;

/// Digest returned when the search fails or comes back empty. The post
/// drafter expects exactly this sentence as the "no references" signal.
pub const NO_REFERENCES_FALLBACK: &str = "참고 자료가 없습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSort {
    /// Most relevant first (`sim`)
    Similarity,
    /// Most recent first (`date`)
    Date,
}

impl SearchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSort::Similarity => "sim",
            SearchSort::Date => "date",
        }
    }
}

impl std::str::FromStr for SearchSort {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sim" => Ok(SearchSort::Similarity),
            "date" => Ok(SearchSort::Date),
            other => Err(SdkError::Configuration(format!(
                "Invalid sort '{}'. Must be one of: sim, date",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub display: u32,
    pub start: u32,
    pub sort: SearchSort,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            display: search::DEFAULT_DISPLAY,
            start: search::DEFAULT_START,
            sort: SearchSort::Similarity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogSearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "bloggername")]
    pub blogger_name: String,
    #[serde(default, rename = "bloggerlink")]
    pub blogger_link: String,
    #[serde(default, rename = "postdate")]
    pub post_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogSearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub display: u32,
    #[serde(default)]
    pub items: Vec<BlogSearchItem>,
}

pub struct BlogSearchClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    base_url: String,
    retry: RetryConfig,
    verbose: bool,
}

impl BlogSearchClient {
    pub fn new(client_id: String, client_secret: SecretString) -> Result<Self> {
        Self::builder()
            .client_id(client_id)
            .client_secret(client_secret)
            .build()
    }

    pub(crate) fn from_config(config: BlogSearchClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("postgen/0.1.0"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SdkError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = match config.base_url {
            Some(url) => crate::builder::validate_base_url(&url)?,
            None => urls::SEARCH_API_BASE.to_string(),
        };

        Ok(Self {
            client,
            client_id: config.client_id,
            client_secret: config.client_secret,
            base_url,
            retry: RetryConfig {
                max_retries: config.max_retries,
                ..Default::default()
            },
            verbose: config.verbose,
        })
    }

    /// Search blog posts for the given keyword.
    pub async fn search(&self, keyword: &str, params: &SearchParams) -> Result<BlogSearchResponse> {
        retry_with_backoff(&self.retry, self.verbose, || {
            self.search_once(keyword, params)
        })
        .await
    }

    async fn search_once(
        &self,
        keyword: &str,
        params: &SearchParams,
    ) -> Result<BlogSearchResponse> {
        let url = format!("{}/search/blog", self.base_url);
        let display = params.display.to_string();
        let start = params.start.to_string();
        let response = self
            .client
            .get(&url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", self.client_secret.expose_secret())
            .query(&[
                ("query", keyword),
                ("display", display.as_str()),
                ("start", start.as_str()),
                ("sort", params.sort.as_str()),
            ])
            .send()
            .await
            .map_err(SdkError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => SdkError::SearchAuth,
                429 => SdkError::RateLimit,
                code => SdkError::Api {
                    status: code,
                    message: response.text().await.unwrap_or_default(),
                },
            });
        }

        response
            .json::<BlogSearchResponse>()
            .await
            .map_err(|_| SdkError::InvalidResponse)
    }

    /// Collapse search results into one digest string for the post drafter.
    ///
    /// Never fails: any error, and an empty result set, both degrade to
    /// [`NO_REFERENCES_FALLBACK`].
    pub async fn reference_digest(&self, keyword: &str) -> String {
        match self.search(keyword, &SearchParams::default()).await {
            Ok(response) if !response.items.is_empty() => {
                let joined = response
                    .items
                    .iter()
                    .map(|item| item.description.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                strip_bold_tags(&joined)
            }
            _ => NO_REFERENCES_FALLBACK.to_string(),
        }
    }
}

/// The search API wraps keyword hits in literal `<b>` tags; strip them.
pub fn strip_bold_tags(text: &str) -> String {
    text.replace("<b>", "").replace("</b>", "")
}
