use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DomainError;

/// A provider-bound handle that turns a prompt into generated text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details so the use cases stay decoupled from any particular provider.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Submit `prompt` as the sole user input and return the completion text.
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;

    /// Provider model identifier this handle is bound to.
    fn model_id(&self) -> &str;
}

/// Builds a fresh [`ChatClient`] for a model id. Called once per session and
/// again whenever the user switches models.
pub trait ChatClientFactory: Send + Sync {
    fn build(&self, model_id: &str) -> Result<Arc<dyn ChatClient>, DomainError>;
}
