//! Interactive terminal shell: reads one submission at a time, renders
//! role-tagged messages and lets the user switch models between turns.

mod command;
mod render;
mod repl;

pub use command::*;
pub use render::*;
pub use repl::*;
