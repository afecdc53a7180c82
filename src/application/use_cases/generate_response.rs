use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{ChatClient, PromptComposer};
use crate::domain::{ChatMessage, DomainError, SessionContext};

/// Number of prior messages rendered into the conversation context.
pub const RECENT_WINDOW: usize = 5;

/// Whether recent session history is threaded into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    #[default]
    Threaded,
    /// Prompt carries only the instructions, examples and current query.
    Ignored,
}

/// Sends composed prompts to a [`ChatClient`] and returns the completion text.
pub struct ResponseGenerator {
    composer: PromptComposer,
    history_mode: HistoryMode,
}

impl ResponseGenerator {
    pub fn new(composer: PromptComposer) -> Self {
        Self {
            composer,
            history_mode: HistoryMode::default(),
        }
    }

    pub fn with_history_mode(mut self, mode: HistoryMode) -> Self {
        self.history_mode = mode;
        self
    }

    pub fn history_mode(&self) -> HistoryMode {
        self.history_mode
    }

    /// Render the last [`RECENT_WINDOW`] messages as `"<Role>: <content>"` lines.
    pub fn render_recent(history: &[ChatMessage]) -> String {
        let start = history.len().saturating_sub(RECENT_WINDOW);
        history[start..]
            .iter()
            .map(ChatMessage::transcript_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Context window for the next prompt, or a history-assembly error.
    pub fn context_window(&self, session: &SessionContext) -> Result<String, DomainError> {
        let history = session.history()?;
        Ok(Self::render_recent(&history))
    }

    /// Build the exact prompt [`generate`](Self::generate) would send.
    ///
    /// History-assembly failures degrade to an empty context window.
    pub fn prepare_prompt(&self, query: &str, session: Option<&SessionContext>) -> String {
        let context = match (self.history_mode, session) {
            (HistoryMode::Threaded, Some(session)) => {
                self.context_window(session).unwrap_or_else(|e| {
                    warn!("Ignoring unusable chat history: {}", e);
                    String::new()
                })
            }
            _ => String::new(),
        };

        self.composer.compose_with_context(query, &context)
    }

    /// Compose and submit a prompt for `query`, returning the model's text as-is.
    ///
    /// `session` should hold the conversation preceding `query`. Any client
    /// failure is reported as [`DomainError::Generation`].
    pub async fn generate(
        &self,
        query: &str,
        client: &dyn ChatClient,
        session: Option<&SessionContext>,
    ) -> Result<String, DomainError> {
        let prompt = self.prepare_prompt(query, session);
        debug!("Prompt for {} ({} chars):\n{}", client.model_id(), prompt.len(), prompt);

        let start_time = Instant::now();
        let completion = client.complete(&prompt).await.map_err(|e| match e {
            DomainError::Generation(_) => e,
            other => DomainError::generation(other.to_string()),
        })?;

        info!(
            "Completion from {} in {:?} ({} chars)",
            client.model_id(),
            start_time.elapsed(),
            completion.len()
        );

        Ok(completion)
    }
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new(PromptComposer::new())
    }
}
