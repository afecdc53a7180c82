pub mod ask_controller;
pub mod models_controller;
pub mod prompt_controller;

pub use ask_controller::AskController;
pub use models_controller::ModelsController;
pub use prompt_controller::PromptController;
