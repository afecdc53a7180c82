/// A parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Free text forwarded to the model.
    Ask(String),
    Models,
    /// `/model <label>`; an empty label shows the current selection.
    SelectModel(String),
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ShellCommand::Empty;
        }
        if trimmed == "quit" || trimmed == "exit" {
            return ShellCommand::Quit;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return ShellCommand::Ask(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "models" => ShellCommand::Models,
            "model" => ShellCommand::SelectModel(arg.to_string()),
            "history" => ShellCommand::History,
            "help" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => ShellCommand::Unknown(other.to_string()),
        }
    }
}

pub const HELP_TEXT: &str = "\
Describe what your car is doing and the Virtual Mechanic will suggest next steps.

Commands:
  /models          list available models
  /model <label>   switch model (e.g. /model Gemma 2 9B)
  /history         show this session's conversation
  /help            show this help
  quit, exit       leave the session";
