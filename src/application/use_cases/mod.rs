mod chat_turn;
mod compose_prompt;
mod generate_response;

pub use chat_turn::*;
pub use compose_prompt::*;
pub use generate_response::*;
