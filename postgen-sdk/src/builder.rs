// ABOUTME: Builder pattern implementations for postgen SDK client configuration
// ABOUTME: Provides type-safe configuration with compile-time required fields

use secrecy::SecretString;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

use crate::chat::ChatClient;
use crate::constants::timeouts;
use crate::error::SdkError;
use crate::search::BlogSearchClient;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<ChatClient, SdkError>))]
pub struct ChatClientConfig {
    pub api_key: SecretString,

    #[builder(default = false)]
    pub verbose: bool,

    #[builder(default = timeouts::CHAT_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = None)]
    pub proxy: Option<reqwest::Proxy>,

    #[builder(default = 3)]
    pub max_retries: u32,

    #[builder(default = None)]
    pub base_url: Option<String>,

    #[builder(default = None)]
    pub model: Option<String>,

    #[builder(default = None)]
    pub temperature: Option<f32>,

    #[builder(default = None)]
    pub max_tokens: Option<u32>,
}

impl From<ChatClientConfig> for Result<ChatClient, SdkError> {
    fn from(config: ChatClientConfig) -> Self {
        ChatClient::from_config(config)
    }
}

impl ChatClient {
    pub fn builder() -> ChatClientConfigBuilder<((), (), (), (), (), (), (), (), ())> {
        ChatClientConfig::builder()
    }
}

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<BlogSearchClient, SdkError>))]
pub struct BlogSearchClientConfig {
    pub client_id: String,

    pub client_secret: SecretString,

    #[builder(default = false)]
    pub verbose: bool,

    #[builder(default = timeouts::SEARCH_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = 3)]
    pub max_retries: u32,

    #[builder(default = None)]
    pub base_url: Option<String>,
}

impl From<BlogSearchClientConfig> for Result<BlogSearchClient, SdkError> {
    fn from(config: BlogSearchClientConfig) -> Self {
        BlogSearchClient::from_config(config)
    }
}

impl BlogSearchClient {
    pub fn builder() -> BlogSearchClientConfigBuilder<((), (), (), (), (), ())> {
        BlogSearchClientConfig::builder()
    }
}

// Helper to create proxy from URL
pub fn create_proxy(url: &str) -> Result<reqwest::Proxy, SdkError> {
    let parsed_url = Url::parse(url)
        .map_err(|e| SdkError::Configuration(format!("Invalid proxy URL: {}", e)))?;

    reqwest::Proxy::all(parsed_url.as_str())
        .map_err(|e| SdkError::Configuration(format!("Invalid proxy configuration: {}", e)))
}

/// Validate an endpoint override and normalize away a trailing slash.
pub(crate) fn validate_base_url(url: &str) -> Result<String, SdkError> {
    Url::parse(url).map_err(|e| SdkError::Configuration(format!("Invalid base URL: {}", e)))?;
    Ok(url.trim_end_matches('/').to_string())
}
