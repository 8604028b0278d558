pub mod args;
pub mod commands;
pub mod shell;

pub use args::*;
pub use commands::CliApp;
