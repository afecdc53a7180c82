mod groq_client;
mod mock_chat_client;
mod secret_stores;

pub use groq_client::*;
pub use mock_chat_client::*;
pub use secret_stores::*;
