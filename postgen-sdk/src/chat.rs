// ABOUTME: Chat-completion client for an OpenAI-compatible hosted model API
// ABOUTME: Provides keyword extraction, post drafting, and translation operations

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::builder::ChatClientConfig;
use crate::constants::{models, urls};
use crate::error::SdkError;
use crate::retry::{RetryConfig, retry_with_backoff};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

/// Everything the post-drafting call needs beyond the system prompt itself.
///
/// The assembled messages keep the exact shape the model was tuned against:
/// tone instruction, image-placement instruction, chosen format, language,
/// then a user message with topic, reference digest, `{filename}` markers,
/// and the optional example of the user's writing style.
#[derive(Debug, Clone)]
pub struct DraftRequest<'a> {
    pub system_prompt: &'a str,
    pub format: &'a str,
    pub tone: Option<&'a str>,
    pub language: &'a str,
    pub topic: &'a str,
    pub references: &'a str,
    pub image_names: &'a [String],
    pub example_text: Option<&'a str>,
}

pub struct ChatClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    retry: RetryConfig,
    verbose: bool,
}

impl ChatClient {
    pub fn new(api_key: SecretString) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub(crate) fn from_config(config: ChatClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("postgen/0.1.0"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout);
        if let Some(proxy) = config.proxy {
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| SdkError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = match config.base_url {
            Some(url) => crate::builder::validate_base_url(&url)?,
            None => urls::CHAT_API_BASE.to_string(),
        };

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url,
            model: config
                .model
                .unwrap_or_else(|| models::DEFAULT_CHAT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            retry: RetryConfig {
                max_retries: config.max_retries,
                ..Default::default()
            },
            verbose: config.verbose,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat-completion request and return the first choice's content.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        retry_with_backoff(&self.retry, self.verbose, || self.complete_once(messages)).await
    }

    async fn complete_once(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(SdkError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => SdkError::ChatAuth,
                429 => SdkError::RateLimit,
                code => SdkError::Api {
                    status: code,
                    message: response.text().await.unwrap_or_default(),
                },
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|_| SdkError::InvalidResponse)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(SdkError::EmptyCompletion)
    }

    /// Extract search keywords from the user's topic, in the given language.
    pub async fn extract_keywords(
        &self,
        system_prompt: &str,
        topic: &str,
        language: &str,
    ) -> Result<String> {
        let messages = [
            ChatMessage::system(format!("{}\n사용 언어: {}", system_prompt, language)),
            ChatMessage::user(topic),
        ];
        self.complete(&messages).await
    }

    /// Draft the final post from the topic, reference material, and images.
    pub async fn draft_post(&self, request: &DraftRequest<'_>) -> Result<String> {
        let messages = build_draft_messages(request);
        self.complete(&messages).await
    }

    /// Translate a drafted post, keeping formatting and image placeholders.
    pub async fn translate(&self, post: &str, target_language: &str) -> Result<String> {
        let messages = [
            ChatMessage::system(format!(
                "Please translate the following text into {}. Maintain the formatting and placeholders for images (e.g., {{image_filename}}).",
                target_language
            )),
            ChatMessage::user(post),
        ];
        self.complete(&messages).await
    }
}

fn build_draft_messages(request: &DraftRequest<'_>) -> Vec<ChatMessage> {
    let tone_instruction = request
        .tone
        .map(|tone| format!("Please write in a {} tone.", tone))
        .unwrap_or_default();
    let example_text_content = match request.example_text {
        Some(example) => format!(
            "Here is an example of the user's previous writing style: {}",
            example
        ),
        None => "The user has not provided an example text.".to_string(),
    };
    let image_instructions = "Please include the images in the generated text at appropriate positions using the format {image_filename}.";
    let image_placeholders = request
        .image_names
        .iter()
        .map(|name| format!("{{{}}}", name))
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        ChatMessage::system(format!(
            "{}\n\n{}\n\n{}\n\n글 형식: {}\n사용 언어: {}",
            request.system_prompt,
            tone_instruction,
            image_instructions,
            request.format,
            request.language
        )),
        ChatMessage::user(format!(
            "사용자의 질문: {}\n참고자료: {}\n입력된 사진: {}\n{}",
            request.topic, request.references, image_placeholders, example_text_content
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ChatClient {
        ChatClient::builder()
            .api_key(SecretString::new("test-api-key".to_string().into_boxed_str()))
            .base_url(Some(base_url.to_string()))
            .max_retries(0)
            .build()
            .expect("client should build")
    }

    #[test]
    fn test_message_constructors() {
        let system = ChatMessage::system("be helpful");
        assert_eq!(system.role, Role::System);
        assert_eq!(system.content, "be helpful");

        let user = ChatMessage::user("hello");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let message = ChatMessage::system("x");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "system");
    }

    #[test]
    fn test_draft_messages_shape() {
        let image_names = vec!["ham1.jpeg".to_string(), "ham2.png".to_string()];
        let request = DraftRequest {
            system_prompt: "당신은 글 작성 전문가입니다.",
            format: "naver_blog format text",
            tone: Some("casual"),
            language: "한국어",
            topic: "맥북 m2와 m3 비교",
            references: "참고자료 본문",
            image_names: &image_names,
            example_text: None,
        };

        let messages = build_draft_messages(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Please write in a casual tone."));
        assert!(messages[0].content.contains("글 형식: naver_blog format text"));
        assert!(messages[0].content.contains("사용 언어: 한국어"));
        assert!(
            messages[0]
                .content
                .contains("using the format {image_filename}")
        );

        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("사용자의 질문: 맥북 m2와 m3 비교"));
        assert!(messages[1].content.contains("입력된 사진: {ham1.jpeg} {ham2.png}"));
        assert!(
            messages[1]
                .content
                .contains("The user has not provided an example text.")
        );
    }

    #[test]
    fn test_draft_messages_with_example_and_no_tone() {
        let request = DraftRequest {
            system_prompt: "prompt",
            format: "format",
            tone: None,
            language: "English",
            topic: "topic",
            references: "refs",
            image_names: &[],
            example_text: Some("my old post"),
        };

        let messages = build_draft_messages(&request);
        assert!(!messages[0].content.contains("tone."));
        assert!(
            messages[1]
                .content
                .contains("Here is an example of the user's previous writing style: my old post")
        );
        assert!(messages[1].content.contains("입력된 사진: \n"));
    }

    #[tokio::test]
    async fn test_complete_parses_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-api-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"  키워드: 맥북  "}}]}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let result = client
            .complete(&[ChatMessage::user("hello")])
            .await
            .expect("completion should succeed");

        assert_eq!(result, "키워드: 맥북");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_maps_auth_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::ChatAuth));
    }

    #[tokio::test]
    async fn test_complete_empty_choices() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::InvalidResponse));
    }
}
