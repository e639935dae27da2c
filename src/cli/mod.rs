//! Terminal front end: a one-shot `analyze` command and an interactive session.

pub mod commands;
pub mod session;

pub use commands::{Cli, Commands, run};
pub use session::{Session, SessionCommand, parse_command};
