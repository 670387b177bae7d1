//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod evaluate;
pub mod parents;
pub mod until_terminal;

// Shared utilities for commands
pub(crate) mod util;
