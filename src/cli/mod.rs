use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat,

    /// Ask a single question and print the answer
    Ask {
        query: String,
    },

    /// List the models that can be selected
    Models,

    /// Print the prompt that would be sent for a query, without calling a model
    Prompt {
        query: String,
    },
}
