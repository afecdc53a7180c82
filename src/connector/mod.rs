//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat completion clients (Groq over HTTP, offline mocks)
//! - Secret stores (environment, TOML secrets file)
//! - The interactive terminal shell and one-shot command routing

pub mod adapter;
pub mod api;
pub mod shell;

pub use adapter::*;
pub use api::{Container, ContainerConfig, Router};
pub use shell::*;
