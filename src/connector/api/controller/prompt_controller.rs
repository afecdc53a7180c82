use anyhow::{bail, Result};

use super::super::Container;

/// Shows the exact prompt a first turn would send, without calling a model.
pub struct PromptController<'a> {
    container: &'a Container,
}

impl<'a> PromptController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn prompt(&self, query: String) -> Result<String> {
        if query.trim().is_empty() {
            bail!("query must not be empty");
        }
        Ok(self.container.response_generator().prepare_prompt(&query, None))
    }
}
