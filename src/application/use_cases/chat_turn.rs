use std::sync::Arc;

use tracing::{info, warn};

use crate::application::{ChatClient, ChatClientFactory, ResponseGenerator};
use crate::domain::{
    default_model, find_model, ChatMessage, DomainError, ModelOption, SessionContext,
};

/// Shown in place of an answer whenever generation fails.
pub const FALLBACK_MESSAGE: &str = "Can't Find Any Solution, Please Consult a Real Mechanic";

#[derive(Debug)]
pub enum TurnOutcome {
    /// The model answered; the text was appended to the history.
    Answered(String),
    /// Generation failed; nothing was appended for the assistant.
    Failed {
        message: &'static str,
        cause: DomainError,
    },
}

impl TurnOutcome {
    /// Text to render for this turn.
    pub fn text(&self) -> &str {
        match self {
            TurnOutcome::Answered(text) => text.as_str(),
            TurnOutcome::Failed { message, .. } => *message,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, TurnOutcome::Answered(_))
    }
}

/// Runs one user turn at a time against the selected model, keeping the
/// session history append-only.
pub struct ChatTurnUseCase {
    session: SessionContext,
    factory: Arc<dyn ChatClientFactory>,
    generator: ResponseGenerator,
    model: ModelOption,
    client: Option<Arc<dyn ChatClient>>,
}

impl ChatTurnUseCase {
    pub fn new(factory: Arc<dyn ChatClientFactory>, generator: ResponseGenerator) -> Self {
        Self {
            session: SessionContext::new(),
            factory,
            generator,
            model: default_model(),
            client: None,
        }
    }

    pub fn with_session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn current_model(&self) -> ModelOption {
        self.model
    }

    pub fn generator(&self) -> &ResponseGenerator {
        &self.generator
    }

    pub fn history(&self) -> Result<Vec<ChatMessage>, DomainError> {
        self.session.history()
    }

    /// Select a model by label, building a new client handle when the
    /// selection changes or none has been built yet.
    pub fn select_model(&mut self, label: &str) -> Result<ModelOption, DomainError> {
        let model = find_model(label)?;
        if self.client.is_some() && model == self.model {
            return Ok(model);
        }

        let client = self.factory.build(model.model_id())?;
        info!("Current model: {} ({})", model.label(), model.model_id());

        self.model = model;
        self.client = Some(client);
        self.session.select_model(model);
        Ok(model)
    }

    /// Handle one user submission.
    ///
    /// Empty input is rejected without touching the history. Otherwise the
    /// user message is always recorded, and the assistant reply only when
    /// generation succeeds.
    pub async fn submit(&mut self, query: &str) -> Result<TurnOutcome, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::invalid_input("query must not be empty"));
        }

        let result = match self.ensure_client() {
            Ok(client) => {
                self.generator
                    .generate(query, client.as_ref(), Some(&self.session))
                    .await
            }
            Err(e) => Err(DomainError::generation(e.to_string())),
        };

        self.record(ChatMessage::user(query));

        match result {
            Ok(text) => {
                self.record(ChatMessage::assistant(text.clone()));
                Ok(TurnOutcome::Answered(text))
            }
            Err(cause) => {
                warn!("Generation failed with {}: {}", self.model.model_id(), cause);
                Ok(TurnOutcome::Failed {
                    message: FALLBACK_MESSAGE,
                    cause,
                })
            }
        }
    }

    fn ensure_client(&mut self) -> Result<Arc<dyn ChatClient>, DomainError> {
        if let Some(client) = &self.client {
            return Ok(Arc::clone(client));
        }
        self.select_model(self.model.label())?;
        self.client
            .clone()
            .ok_or_else(|| DomainError::configuration("no chat client available"))
    }

    fn record(&mut self, message: ChatMessage) {
        if let Err(e) = self.session.append(message) {
            warn!("Could not record message in session history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{MockBehaviour, MockChatClientFactory};
    use crate::domain::Role;

    fn use_case(behaviour: MockBehaviour) -> (ChatTurnUseCase, Arc<MockChatClientFactory>) {
        let factory = Arc::new(MockChatClientFactory::new(behaviour));
        let use_case = ChatTurnUseCase::new(factory.clone(), ResponseGenerator::default());
        (use_case, factory)
    }

    #[tokio::test]
    async fn test_successful_turns_alternate_roles() {
        let (mut turns, _) = use_case(MockBehaviour::Fixed("Check the oil.".to_string()));

        for query in ["Knocking noise", "Still knocking", "Oil is fine"] {
            let outcome = turns.submit(query).await.unwrap();
            assert!(outcome.is_answered());
            assert_eq!(outcome.text(), "Check the oil.");
        }

        let history = turns.history().unwrap();
        assert_eq!(history.len(), 6);
        for (i, message) in history.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(message.role(), expected);
        }
        assert_eq!(history[2].content(), "Still knocking");
    }

    #[tokio::test]
    async fn test_failed_turn_records_only_user_message() {
        let (mut turns, _) = use_case(MockBehaviour::Fail("network down".to_string()));

        let outcome = turns.submit("Brakes squeal").await.unwrap();

        assert!(!outcome.is_answered());
        assert_eq!(outcome.text(), FALLBACK_MESSAGE);
        let history = turns.history().unwrap();
        assert_eq!(history, vec![ChatMessage::user("Brakes squeal")]);
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_history_change() {
        let (mut turns, factory) = use_case(MockBehaviour::Echo);

        let err = turns.submit("   ").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert!(turns.session().is_empty());
        assert!(factory.built_models().is_empty());
    }

    #[tokio::test]
    async fn test_default_model_is_built_lazily_once() {
        let (mut turns, factory) = use_case(MockBehaviour::Echo);

        turns.submit("one").await.unwrap();
        turns.submit("two").await.unwrap();

        assert_eq!(factory.built_models(), vec!["llama-3.1-70b-versatile".to_string()]);
    }

    #[tokio::test]
    async fn test_switching_models_rebuilds_client_before_next_turn() {
        let (mut turns, factory) = use_case(MockBehaviour::Echo);
        turns.select_model("Llama 3.1 70B").unwrap();
        turns.submit("first").await.unwrap();

        turns.select_model("Gemma 7B").unwrap();
        turns.submit("second").await.unwrap();

        assert_eq!(
            factory.built_models(),
            vec!["llama-3.1-70b-versatile".to_string(), "gemma-7b-it".to_string()]
        );
        assert_eq!(factory.last_client().unwrap().prompts().len(), 1);
        assert_eq!(turns.current_model().model_id(), "gemma-7b-it");
        assert_eq!(turns.session().selected_model_label(), Some("Gemma 7B"));
    }

    #[tokio::test]
    async fn test_reselecting_same_model_keeps_handle() {
        let (mut turns, factory) = use_case(MockBehaviour::Echo);
        turns.select_model("Mixtral 8x7B").unwrap();
        turns.select_model("Mixtral 8x7B").unwrap();

        assert_eq!(factory.built_models().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_model_keeps_current_selection() {
        let (mut turns, _) = use_case(MockBehaviour::Echo);
        turns.select_model("Gemma 7B").unwrap();

        assert!(turns.select_model("GPT-9").is_err());
        assert_eq!(turns.current_model().label(), "Gemma 7B");
    }

    #[tokio::test]
    async fn test_prompt_excludes_current_query_from_context() {
        let (mut turns, factory) =
            use_case(MockBehaviour::Fixed("Check the idle air valve.".to_string()));
        turns.submit("Engine stalls at idle").await.unwrap();
        turns.submit("Only when cold").await.unwrap();

        let prompts = factory.last_client().unwrap().prompts();
        let second = &prompts[1];
        assert!(second.contains(
            "Recent conversation:\nUser: Engine stalls at idle\nAssistant: Check the idle air valve.\n\n"
        ));
        assert!(!second.contains("User: Only when cold"));
    }
}
