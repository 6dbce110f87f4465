pub mod commands;
pub mod state;

pub use commands::{Builtin, BuiltinRegistry, Command, CommandError, Flow};
pub use state::ShellState;
