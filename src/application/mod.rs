//! # Application Layer
//!
//! Interfaces to external collaborators and the use cases that orchestrate
//! prompt composition, generation and session turns.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
