pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    ChatClient, ChatClientFactory, ChatTurnUseCase, HistoryMode, PromptComposer,
    ResponseGenerator, SecretStore, TurnOutcome, ACTION_CUE, FALLBACK_MESSAGE, QUERY_LABEL,
    RECENT_WINDOW,
};

pub use connector::{
    ChainedSecretStore, ChatShell, Container, ContainerConfig, EnvSecretStore, GroqClient,
    GroqClientFactory, MockBehaviour, MockChatClient, MockChatClientFactory, Router, ShellAction,
    ShellCommand, TomlSecretStore,
};

pub use domain::{
    default_model, find_model, ChatMessage, DomainError, FewShotExample, ModelOption, Role,
    SessionContext, SessionState, FEW_SHOT_EXAMPLES, MODEL_CATALOG,
};
