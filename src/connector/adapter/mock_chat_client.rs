use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::{ChatClient, ChatClientFactory};
use crate::domain::DomainError;

/// How a [`MockChatClient`] answers.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Always return this text.
    Fixed(String),
    /// Return the prompt unchanged.
    Echo,
    /// Return the last `n` characters of the prompt.
    EchoTail(usize),
    /// Fail with a generation error carrying this message.
    Fail(String),
    /// Fail with an arbitrary error.
    FailWith(fn() -> DomainError),
}

/// Offline [`ChatClient`] that records every prompt it receives.
pub struct MockChatClient {
    model_id: String,
    behaviour: MockBehaviour,
    prompts: Mutex<Vec<String>>,
}

impl MockChatClient {
    pub fn new(model_id: impl Into<String>, behaviour: MockBehaviour) -> Self {
        Self {
            model_id: model_id.into(),
            behaviour,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.behaviour {
            MockBehaviour::Fixed(text) => Ok(text.clone()),
            MockBehaviour::Echo => Ok(prompt.to_string()),
            MockBehaviour::EchoTail(n) => {
                let skip = prompt.chars().count().saturating_sub(*n);
                Ok(prompt.chars().skip(skip).collect())
            }
            MockBehaviour::Fail(msg) => Err(DomainError::generation(msg.clone())),
            MockBehaviour::FailWith(make) => Err(make()),
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Factory producing [`MockChatClient`]s; remembers which model ids were built.
pub struct MockChatClientFactory {
    behaviour: MockBehaviour,
    built: Mutex<Vec<Arc<MockChatClient>>>,
}

impl MockChatClientFactory {
    pub fn new(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            built: Mutex::new(Vec::new()),
        }
    }

    pub fn built_models(&self) -> Vec<String> {
        self.built
            .lock()
            .map(|b| b.iter().map(|c| c.model_id.clone()).collect())
            .unwrap_or_default()
    }

    pub fn last_client(&self) -> Option<Arc<MockChatClient>> {
        self.built.lock().ok().and_then(|b| b.last().cloned())
    }
}

impl ChatClientFactory for MockChatClientFactory {
    fn build(&self, model_id: &str) -> Result<Arc<dyn ChatClient>, DomainError> {
        let client = Arc::new(MockChatClient::new(model_id, self.behaviour.clone()));
        self.built
            .lock()
            .map_err(|_| DomainError::configuration("mock factory lock poisoned"))?
            .push(Arc::clone(&client));
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_tail_counts_characters() {
        let client = MockChatClient::new("m", MockBehaviour::EchoTail(3));
        assert_eq!(client.complete("brake✓").await.unwrap(), "ke✓");
        assert_eq!(client.complete("ab").await.unwrap(), "ab");
    }

    #[tokio::test]
    async fn test_prompts_are_recorded() {
        let client = MockChatClient::new("m", MockBehaviour::Fixed("ok".to_string()));
        client.complete("first").await.unwrap();
        client.complete("second").await.unwrap();
        assert_eq!(client.prompts(), vec!["first", "second"]);
    }

    #[test]
    fn test_factory_tracks_built_models() {
        let factory = MockChatClientFactory::new(MockBehaviour::Echo);
        factory.build("a").unwrap();
        factory.build("b").unwrap();
        assert_eq!(factory.built_models(), vec!["a", "b"]);
        assert_eq!(factory.last_client().unwrap().model_id(), "b");
    }
}
