use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ModelsController, PromptController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    models_controller: ModelsController<'a>,
    prompt_controller: PromptController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            models_controller: ModelsController::new(container),
            prompt_controller: PromptController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { query } => self.ask_controller.ask(query).await,
            Commands::Models => Ok(self.models_controller.list()),
            Commands::Prompt { query } => self.prompt_controller.prompt(query),
            Commands::Chat => unreachable!("Chat command is handled separately in main"),
        }
    }
}
