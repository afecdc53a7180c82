use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mechanic::connector::api::DEFAULT_SECRETS_PATH;
use mechanic::connector::DEFAULT_BASE_URL;
use mechanic::{ChatShell, Commands, Container, ContainerConfig, HistoryMode, Router};

#[derive(Parser)]
#[command(name = "mechanic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model label to start with (see `mechanic models`)
    #[arg(short, long, global = true, default_value = "Llama 3.1 70B")]
    model: String,

    /// Answer from an offline mock model instead of calling Groq
    #[arg(long, global = true)]
    mock: bool,

    /// TOML file holding `groq_api_key`, consulted after the environment
    #[arg(long, global = true, default_value = DEFAULT_SECRETS_PATH)]
    secrets: String,

    #[arg(long, global = true, env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Leave earlier turns out of the prompt
    #[arg(long, global = true)]
    no_history: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Chat);

    // Keep the chat transcript readable unless asked for diagnostics.
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        model_label: cli.model.clone(),
        mock: cli.mock,
        secrets_path: PathBuf::from(expand_tilde(&cli.secrets)),
        base_url: cli.base_url.clone(),
        history_mode: if cli.no_history {
            HistoryMode::Ignored
        } else {
            HistoryMode::Threaded
        },
    });

    if command == Commands::Chat {
        let use_case = container.chat_turn_use_case()?;
        info!("Starting chat session with {}", use_case.current_model().label());
        return ChatShell::new(use_case).run().await;
    }

    let router = Router::new(&container);
    let output = router.route(command).await?;
    println!("{}", output);

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn defaults_to_chat_with_first_model() {
        let cli = Cli::try_parse_from(["mechanic"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.model, "Llama 3.1 70B");
        assert!(!cli.no_history);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "mechanic",
            "ask",
            "Brakes squeal",
            "--model",
            "Gemma 7B",
            "--mock",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Ask {
                query: "Brakes squeal".to_string()
            })
        );
        assert_eq!(cli.model, "Gemma 7B");
        assert!(cli.mock);
    }

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/etc/secrets.toml"), "/etc/secrets.toml");
    }
}
