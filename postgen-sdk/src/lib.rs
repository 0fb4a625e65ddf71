// ABOUTME: postgen SDK providing typed clients for the hosted APIs behind postgen
// ABOUTME: Covers chat-completion (keywords, drafting, translation) and blog search

pub mod builder;
pub mod chat;
pub mod constants;
pub mod error;
pub mod retry;
pub mod search;

pub use builder::{BlogSearchClientConfig, ChatClientConfig, create_proxy};
pub use chat::{ChatClient, ChatMessage, DraftRequest, Role};
pub use error::SdkError;
pub use retry::{RetryConfig, retry_with_backoff};
pub use search::{
    BlogSearchClient, BlogSearchItem, BlogSearchResponse, NO_REFERENCES_FALLBACK, SearchParams,
    SearchSort, strip_bold_tags,
};

pub type Result<T> = std::result::Result<T, SdkError>;
