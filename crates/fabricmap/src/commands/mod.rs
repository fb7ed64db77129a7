//! Command dispatch: bridges CLI args -> engine -> output formatting.

pub mod classify;
pub mod config_cmd;
pub mod layout;
pub mod tree;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;

/// Dispatch a graph-bound command to the appropriate handler.
pub fn dispatch(cmd: &Command, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let view = config::presentation(global, cfg)?;
    match cmd {
        Command::Layout(args) => layout::handle(args, cfg, view),
        Command::Tree(args) => tree::handle(args, view),
        Command::Classify(args) => classify::handle(args, view),
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "completions are generated before dispatch".into(),
        }),
    }
}
