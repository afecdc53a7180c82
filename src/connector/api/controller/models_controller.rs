use crate::domain::{default_model, ModelOption, MODEL_CATALOG};

use super::super::Container;

pub struct ModelsController<'a> {
    container: &'a Container,
}

impl<'a> ModelsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn list(&self) -> String {
        self.format_models(&MODEL_CATALOG, &self.container.config().model_label)
    }

    fn format_models(&self, models: &[ModelOption], selected: &str) -> String {
        let default = default_model();
        let width = models.iter().map(|m| m.label().len()).max().unwrap_or(0);

        let mut output = "Available models:\n\n".to_string();
        for model in models {
            let marker = if model.label() == selected { "*" } else { " " };
            let suffix = if *model == default { " (default)" } else { "" };
            output.push_str(&format!(
                "{} {:<width$}  {}{}\n",
                marker,
                model.label(),
                model.model_id(),
                suffix,
                width = width
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::api::ContainerConfig;
    use crate::HistoryMode;
    use std::path::PathBuf;

    #[test]
    fn test_list_marks_selected_and_default() {
        let container = Container::new(ContainerConfig {
            model_label: "Gemma 2 9B".to_string(),
            mock: true,
            secrets_path: PathBuf::from("/nonexistent/secrets.toml"),
            base_url: String::new(),
            history_mode: HistoryMode::Threaded,
        });

        let output = ModelsController::new(&container).list();
        let lines: Vec<&str> = output.lines().skip(2).collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("  Llama 3.1 70B"));
        assert!(lines[0].ends_with("llama-3.1-70b-versatile (default)"));
        assert!(lines[5].starts_with("* Gemma 2 9B"));
    }
}
