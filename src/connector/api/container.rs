use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::application::{ChatClientFactory, SecretStore, GROQ_API_KEY_SECRET};
use crate::{
    ChainedSecretStore, ChatTurnUseCase, EnvSecretStore, GroqClientFactory, HistoryMode,
    MockBehaviour, MockChatClientFactory, PromptComposer, ResponseGenerator, TomlSecretStore,
};

pub const DEFAULT_SECRETS_PATH: &str = "~/.mechanic/secrets.toml";

/// Reply used by every mock client when running with `--mock`.
pub const MOCK_REPLY: &str = "This is an offline answer. Set GROQ_API_KEY or add groq_api_key \
to your secrets file to consult a hosted model.";

pub struct ContainerConfig {
    /// Catalog label of the model to start the session with.
    pub model_label: String,
    /// Answer from an offline mock client instead of calling Groq.
    pub mock: bool,
    /// TOML secrets file consulted after the environment.
    pub secrets_path: PathBuf,
    pub base_url: String,
    pub history_mode: HistoryMode,
}

pub struct Container {
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn response_generator(&self) -> ResponseGenerator {
        ResponseGenerator::new(PromptComposer::new()).with_history_mode(self.config.history_mode)
    }

    /// Secret lookup order: environment first, then the secrets file if present.
    pub fn secret_store(&self) -> Result<ChainedSecretStore> {
        self.layered_secret_store(EnvSecretStore::new())
    }

    /// An unreadable secrets file only aborts startup when `env` does not
    /// already hold the Groq key.
    fn layered_secret_store(&self, env: impl SecretStore + 'static) -> Result<ChainedSecretStore> {
        let path = &self.config.secrets_path;
        if !path.exists() {
            debug!("No secrets file at {}, using environment only", path.display());
            return Ok(ChainedSecretStore::new().with_store(env));
        }

        match TomlSecretStore::load(path) {
            Ok(file) => {
                debug!("Using secrets file {}", file.path().display());
                Ok(ChainedSecretStore::new().with_store(env).with_store(file))
            }
            Err(e) if env.get(GROQ_API_KEY_SECRET).is_some() => {
                warn!("Ignoring secrets file, key found in environment: {}", e);
                Ok(ChainedSecretStore::new().with_store(env))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn client_factory(&self) -> Result<Arc<dyn ChatClientFactory>> {
        if self.config.mock {
            debug!("Using mock chat client");
            return Ok(Arc::new(MockChatClientFactory::new(MockBehaviour::Fixed(
                MOCK_REPLY.to_string(),
            ))));
        }

        let api_key = self.secret_store()?.get(GROQ_API_KEY_SECRET).ok_or_else(|| {
            anyhow!(
                "no Groq API key found: set GROQ_API_KEY or add {} to {}",
                GROQ_API_KEY_SECRET,
                self.config.secrets_path.display()
            )
        })?;

        debug!("Using Groq endpoint {}", self.config.base_url);
        Ok(Arc::new(GroqClientFactory::new(
            api_key,
            self.config.base_url.clone(),
        )?))
    }

    /// Fresh session with the configured model already bound.
    pub fn chat_turn_use_case(&self) -> Result<ChatTurnUseCase> {
        let mut use_case = ChatTurnUseCase::new(self.client_factory()?, self.response_generator());
        use_case.select_model(&self.config.model_label)?;
        Ok(use_case)
    }
}
