use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{ChatClient, ChatClientFactory};
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for Groq's OpenAI-compatible chat completions endpoint.
///
/// The prompt is sent as a single `user` message; the first choice's content
/// is returned untouched. Transport failures, non-2xx statuses and responses
/// without text all surface as [`DomainError::Generation`].
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl GroqClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::configuration(format!("GroqClient: {e}")))?;
        Ok(Self::with_http_client(client, api_key, model, base_url))
    }

    pub fn with_http_client(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            url: completions_url(&base_url.into()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ApiRequest<'a> {
        ApiRequest {
            model: &self.model,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        }
    }

    fn extract_text(body: &str) -> Result<String, DomainError> {
        let response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::generation(format!("GroqClient: failed to parse response: {e}"))
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::generation("GroqClient: response contained no text"))
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH)
}

#[async_trait]
impl ChatClient for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let request = self.build_request(prompt);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::generation(format!("GroqClient: request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::generation(format!("GroqClient: failed to read body: {e}")))?;

        if !status.is_success() {
            warn!("GroqClient: API returned {status}: {body}");
            return Err(DomainError::generation(format!(
                "GroqClient: API returned {status}"
            )));
        }

        debug!("GroqClient raw response: {}", body);
        Self::extract_text(&body)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Builds [`GroqClient`]s sharing one credential, endpoint and connection pool.
pub struct GroqClientFactory {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GroqClientFactory {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::configuration(format!("GroqClient: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ChatClientFactory for GroqClientFactory {
    fn build(&self, model_id: &str) -> Result<Arc<dyn ChatClient>, DomainError> {
        if self.api_key.trim().is_empty() {
            return Err(DomainError::configuration("Groq API key is empty"));
        }
        debug!("Building Groq client for {} at {}", model_id, self.base_url);
        Ok(Arc::new(GroqClient::with_http_client(
            self.client.clone(),
            self.api_key.clone(),
            model_id,
            self.base_url.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_trims_trailing_slash() {
        assert_eq!(
            completions_url("https://api.groq.com/"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(
            completions_url("http://localhost:8080"),
            "http://localhost:8080/openai/v1/chat/completions"
        );
    }

    #[test]
    fn request_sends_prompt_as_single_user_message() {
        let client = GroqClient::new("key", "gemma2-9b-it", DEFAULT_BASE_URL).unwrap();
        let json = serde_json::to_value(client.build_request("Brakes squeal")).unwrap();

        assert_eq!(json["model"], "gemma2-9b-it");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Brakes squeal");
    }

    #[test]
    fn extract_text_returns_first_choice_verbatim() {
        let body = r#"{"id":"x","choices":[
            {"index":0,"message":{"role":"assistant","content":" Check the pads.\n"}},
            {"index":1,"message":{"role":"assistant","content":"ignored"}}
        ]}"#;
        assert_eq!(GroqClient::extract_text(body).unwrap(), " Check the pads.\n");
    }

    #[test]
    fn extract_text_rejects_empty_choices() {
        let err = GroqClient::extract_text(r#"{"choices":[]}"#).unwrap_err();
        assert!(err.is_generation_error());
    }

    #[test]
    fn extract_text_rejects_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(GroqClient::extract_text(body).is_err());
    }

    #[test]
    fn extract_text_rejects_non_json() {
        let err = GroqClient::extract_text("<html>502</html>").unwrap_err();
        assert!(err.is_generation_error());
    }

    #[test]
    fn factory_binds_requested_model() {
        let factory = GroqClientFactory::new("key", DEFAULT_BASE_URL).unwrap();
        let client = factory.build("mixtral-8x7b-32768").unwrap();
        assert_eq!(client.model_id(), "mixtral-8x7b-32768");
    }

    #[test]
    fn factory_refuses_blank_key() {
        let factory = GroqClientFactory::new("  ", DEFAULT_BASE_URL).unwrap();
        assert!(factory.build("gemma-7b-it").is_err());
    }

    #[tokio::test]
    async fn unreachable_server_is_generation_error() {
        let client = GroqClient::new("key", "gemma-7b-it", "http://127.0.0.1:9").unwrap();
        let err = client.complete("hello").await.unwrap_err();
        assert!(err.is_generation_error());
    }
}
