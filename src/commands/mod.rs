//! Subcommand implementations.

mod common;
mod init;
mod search;
mod validate;

pub use init::{InitArgs, init_config};
pub use search::{SearchArgs, process_search};
pub use validate::{ValidateArgs, validate_config};
