// ABOUTME: Custom error types for the postgen SDK with user-friendly messages
// ABOUTME: Provides specific error handling for chat-completion and blog-search failure modes

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Authentication failed. Check your OPENAI_API_KEY")]
    ChatAuth,

    #[error("Authentication failed. Check your NAVER_CLIENT_ID and NAVER_CLIENT_SECRET")]
    SearchAuth,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded. Please wait before making more requests")]
    RateLimit,

    #[error("Invalid API response format")]
    InvalidResponse,

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("The model returned no choices")]
    EmptyCompletion,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SdkError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            SdkError::ChatAuth => {
                Some("Get your API key from: https://platform.openai.com/api-keys")
            }
            SdkError::SearchAuth => Some(
                "Register an application at https://developers.naver.com/apps to get a client id and secret",
            ),
            SdkError::Network(_) => Some("Check your internet connection and try again"),
            SdkError::RateLimit => Some("Wait a moment before making another request"),
            SdkError::Timeout => Some("Try again or check your network connection"),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SdkError::Network(_) | SdkError::Timeout | SdkError::RateLimit
        )
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SdkError::Timeout
        } else if err.is_status() {
            if let Some(status) = err.status() {
                match status.as_u16() {
                    429 => SdkError::RateLimit,
                    _ => SdkError::Network(err.to_string()),
                }
            } else {
                SdkError::Network(err.to_string())
            }
        } else {
            SdkError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(_err: serde_json::Error) -> Self {
        SdkError::InvalidResponse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SdkError::ChatAuth.to_string(),
            "Authentication failed. Check your OPENAI_API_KEY"
        );
        assert_eq!(
            SdkError::SearchAuth.to_string(),
            "Authentication failed. Check your NAVER_CLIENT_ID and NAVER_CLIENT_SECRET"
        );
        assert_eq!(
            SdkError::Network("Connection refused".to_string()).to_string(),
            "Network error: Connection refused"
        );
        assert_eq!(
            SdkError::Api {
                status: 500,
                message: "server blew up".to_string()
            }
            .to_string(),
            "API error 500: server blew up"
        );
        assert_eq!(
            SdkError::EmptyCompletion.to_string(),
            "The model returned no choices"
        );
    }

    #[test]
    fn test_help_text() {
        assert!(
            SdkError::ChatAuth
                .help_text()
                .unwrap()
                .contains("platform.openai.com")
        );
        assert!(
            SdkError::SearchAuth
                .help_text()
                .unwrap()
                .contains("developers.naver.com")
        );
        assert_eq!(
            SdkError::Api {
                status: 500,
                message: "oops".to_string()
            }
            .help_text(),
            None
        );
        assert_eq!(SdkError::EmptyCompletion.help_text(), None);
    }

    #[test]
    fn test_retryable() {
        assert!(SdkError::Network("test".to_string()).is_retryable());
        assert!(SdkError::Timeout.is_retryable());
        assert!(SdkError::RateLimit.is_retryable());
        assert!(!SdkError::ChatAuth.is_retryable());
        assert!(!SdkError::SearchAuth.is_retryable());
        assert!(!SdkError::InvalidResponse.is_retryable());
        assert!(
            !SdkError::Api {
                status: 500,
                message: String::new()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(SdkError::from(err), SdkError::InvalidResponse));
    }
}
