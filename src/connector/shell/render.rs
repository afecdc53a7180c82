use colored::Colorize;

use crate::domain::{ChatMessage, Role};

pub const TITLE: &str = "🛠  Virtual Mechanic Assistant 👨‍🔧";
pub const THINKING: &str = "Virtual Mechanic is Thinking...";

pub fn render_banner(model_label: &str) -> String {
    let model_line = format!("Model: {model_label}");
    format!(
        "{}\n{}\n{}",
        TITLE.bright_magenta().bold(),
        model_line.as_str().bright_black(),
        "Ask a question about unusual car symptoms, or type /help.".bright_black()
    )
}

/// Role-tagged rendering of one chat message.
pub fn render_message(message: &ChatMessage) -> String {
    match message.role() {
        Role::User => format!("{} {}", "🙋 You:".green().bold(), message.content().green()),
        Role::Assistant => {
            let body = message
                .content()
                .lines()
                .map(|line| line.bright_blue().to_string())
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{}", "👨‍🔧 Mechanic:".bright_blue().bold(), body)
        }
    }
}

pub fn render_error(text: &str) -> String {
    text.red().to_string()
}

pub fn render_notice(text: &str) -> String {
    text.bright_black().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_lines_are_all_rendered() {
        let rendered = render_message(&ChatMessage::assistant("Check oil.\nThen coolant."));
        assert!(rendered.contains("Mechanic:"));
        assert!(rendered.contains("Check oil."));
        assert!(rendered.contains("Then coolant."));
    }

    #[test]
    fn test_user_message_is_tagged() {
        let rendered = render_message(&ChatMessage::user("Brakes squeal"));
        assert!(rendered.contains("You:"));
        assert!(rendered.contains("Brakes squeal"));
    }

    #[test]
    fn test_banner_names_model() {
        assert!(render_banner("Gemma 7B").contains("Model: Gemma 7B"));
    }
}
