pub mod container;
pub mod controller;
pub mod router;

pub use container::{Container, ContainerConfig, DEFAULT_SECRETS_PATH, MOCK_REPLY};
pub use router::Router;
