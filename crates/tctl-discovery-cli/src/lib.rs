//! C9 — Command Dispatch (§4.9) plus the presentation layers it drives.
//!
//! `args` is the `clap` surface, `dispatch::run` is the single entry
//! point the binary calls, and `handlers` holds one module per
//! subcommand family.

pub mod args;
pub mod clients;
pub mod color;
mod dispatch;
mod handlers;
mod output;
pub mod router;
pub mod table;
pub mod text;

pub use args::{Cli, DiscoveryCommand, SsmRunsCommand, TasksCommand, TopCommand};
pub use dispatch::{run, run_with_clients};
