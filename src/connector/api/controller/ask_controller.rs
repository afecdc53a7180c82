use anyhow::Result;

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// One-shot turn in a fresh session. Generation failures yield the
    /// fallback text rather than an error.
    pub async fn ask(&self, query: String) -> Result<String> {
        let mut use_case = self.container.chat_turn_use_case()?;
        let outcome = use_case.submit(&query).await?;
        Ok(outcome.text().to_string())
    }
}
