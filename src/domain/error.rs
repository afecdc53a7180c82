use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Recent history could not be rendered. Callers recover with an empty
    /// context window; this never reaches the user.
    #[error("History assembly error: {0}")]
    HistoryAssembly(String),

    /// Prompt submission or response extraction failed.
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn history(msg: impl Into<String>) -> Self {
        Self::HistoryAssembly(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn is_generation_error(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    pub fn is_history_error(&self) -> bool {
        matches!(self, Self::HistoryAssembly(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
