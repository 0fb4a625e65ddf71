// ABOUTME: Centralized constants for the postgen SDK
// ABOUTME: Contains retry configuration, timeouts, endpoints, and search defaults

/// Retry configuration constants
pub mod retry {
    use std::time::Duration;

    /// Maximum number of retry attempts
    pub const MAX_RETRIES: u32 = 3;

    /// Initial delay before first retry
    pub const INITIAL_DELAY: Duration = Duration::from_millis(100);

    /// Maximum delay between retries
    pub const MAX_DELAY: Duration = Duration::from_secs(10);

    /// Backoff multiplier for exponential backoff
    pub const BACKOFF_MULTIPLIER: f64 = 2.0;
}

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for chat-completion requests (drafting a post is slow)
    pub const CHAT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default timeout for blog-search requests
    pub const SEARCH_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Hosted API endpoints
pub mod urls {
    /// Base URL for the OpenAI-compatible chat-completion API
    pub const CHAT_API_BASE: &str = "https://api.openai.com/v1";

    /// Base URL for the Naver open API (blog search lives under /search/blog)
    pub const SEARCH_API_BASE: &str = "https://openapi.naver.com/v1";
}

/// Model defaults
pub mod models {
    /// Default chat-completion model
    pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
}

/// Blog-search parameter defaults
pub mod search {
    /// Default number of results per query
    pub const DEFAULT_DISPLAY: u32 = 10;

    /// Default result offset (the API is 1-based)
    pub const DEFAULT_START: u32 = 1;

    /// Maximum number of results the API will return per query
    pub const MAX_DISPLAY: u32 = 100;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_retry_constants() {
        assert_eq!(retry::MAX_RETRIES, 3);
        assert_eq!(retry::INITIAL_DELAY, Duration::from_millis(100));
        assert_eq!(retry::MAX_DELAY, Duration::from_secs(10));
        assert_eq!(retry::BACKOFF_MULTIPLIER, 2.0);
    }

    #[test]
    fn test_timeout_constants() {
        assert_eq!(timeouts::CHAT_REQUEST_TIMEOUT, Duration::from_secs(60));
        assert_eq!(timeouts::SEARCH_REQUEST_TIMEOUT, Duration::from_secs(10));
    }

    #[test]
    fn test_url_constants() {
        assert!(urls::CHAT_API_BASE.starts_with("https://"));
        assert!(urls::SEARCH_API_BASE.contains("openapi.naver.com"));
    }

    #[test]
    fn test_search_constants() {
        assert_eq!(search::DEFAULT_DISPLAY, 10);
        assert_eq!(search::DEFAULT_START, 1);
        assert!(search::DEFAULT_DISPLAY <= search::MAX_DISPLAY);
    }
}
