use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

use super::{
    render_banner, render_error, render_message, render_notice, ShellCommand, HELP_TEXT, THINKING,
};
use crate::application::{ChatTurnUseCase, TurnOutcome};
use crate::domain::{ChatMessage, MODEL_CATALOG};

/// What the loop should do after handling one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Print the text (if any) and read the next line.
    Continue(String),
    /// Print the text and leave the session.
    Quit(String),
}

/// Line-oriented chat shell over a single session.
///
/// Turns are strictly serialised: the next line is not read until the
/// pending model call has finished.
pub struct ChatShell {
    turns: ChatTurnUseCase,
    spinner: bool,
}

impl ChatShell {
    pub fn new(turns: ChatTurnUseCase) -> Self {
        Self {
            turns,
            spinner: true,
        }
    }

    /// Disable the loading indicator (for non-interactive output).
    pub fn without_spinner(mut self) -> Self {
        self.spinner = false;
        self
    }

    pub fn turns(&self) -> &ChatTurnUseCase {
        &self.turns
    }

    pub async fn handle(&mut self, command: ShellCommand) -> ShellAction {
        match command {
            ShellCommand::Empty => ShellAction::Continue(String::new()),
            ShellCommand::Quit => ShellAction::Quit("Goodbye!".to_string()),
            ShellCommand::Help => ShellAction::Continue(HELP_TEXT.to_string()),
            ShellCommand::Models => ShellAction::Continue(self.list_models()),
            ShellCommand::SelectModel(label) => ShellAction::Continue(self.select_model(&label)),
            ShellCommand::History => ShellAction::Continue(self.show_history()),
            ShellCommand::Unknown(name) => ShellAction::Continue(render_notice(&format!(
                "Unknown command /{name}. Type /help for the list."
            ))),
            ShellCommand::Ask(query) => ShellAction::Continue(self.ask(&query).await),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        println!("{}", render_banner(self.turns.current_model().label()));
        println!();

        loop {
            match rl.readline(">> ") {
                Ok(line) => {
                    let command = ShellCommand::parse(&line);
                    if matches!(command, ShellCommand::Ask(_)) {
                        remember_line(&mut rl, &line);
                        println!("{}", render_message(&ChatMessage::user(line.trim())));
                    }

                    match self.handle(command).await {
                        ShellAction::Continue(output) => {
                            if !output.is_empty() {
                                println!("{output}");
                                println!();
                            }
                        }
                        ShellAction::Quit(output) => {
                            println!("{}", render_notice(&output));
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", render_notice("CTRL-C detected. Type 'quit' to exit."));
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", render_notice("Goodbye!"));
                    break;
                }
                Err(err) => {
                    warn!("Readline failed: {}", err);
                    return Err(err.into());
                }
            }
        }

        Ok(())
    }

    async fn ask(&mut self, query: &str) -> String {
        let spinner = self.spinner.then(start_spinner);
        let result = self.turns.submit(query).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match result {
            Ok(TurnOutcome::Answered(text)) => render_message(&ChatMessage::assistant(text)),
            Ok(TurnOutcome::Failed { message, cause }) => {
                debug!("Turn failed: {}", cause);
                render_error(message)
            }
            Err(e) => render_error(&e.to_string()),
        }
    }

    fn list_models(&self) -> String {
        let current = self.turns.current_model();
        MODEL_CATALOG
            .iter()
            .map(|m| {
                let marker = if *m == current { "*" } else { " " };
                format!("{} {} ({})", marker, m.label(), m.model_id())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn select_model(&mut self, label: &str) -> String {
        if label.is_empty() {
            let current = self.turns.current_model();
            return render_notice(&format!(
                "Current model: {} ({})",
                current.label(),
                current.model_id()
            ));
        }

        match self.turns.select_model(label) {
            Ok(model) => render_notice(&format!(
                "Switched to {} ({})",
                model.label(),
                model.model_id()
            )),
            Err(e) => render_error(&e.to_string()),
        }
    }

    fn show_history(&self) -> String {
        match self.turns.history() {
            Ok(history) if history.is_empty() => render_notice("No messages yet."),
            Ok(history) => history
                .iter()
                .map(render_message)
                .collect::<Vec<_>>()
                .join("\n\n"),
            Err(e) => render_error(&e.to_string()),
        }
    }
}

fn remember_line(rl: &mut DefaultEditor, line: &str) {
    if let Err(e) = rl.add_history_entry(line) {
        debug!("Could not add line to input history: {}", e);
    }
}

fn start_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(THINKING);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
