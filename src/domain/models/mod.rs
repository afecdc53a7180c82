mod chat_message;
mod few_shot_example;
mod model_option;
mod session;

pub use chat_message::*;
pub use few_shot_example::*;
pub use model_option::*;
pub use session::*;
