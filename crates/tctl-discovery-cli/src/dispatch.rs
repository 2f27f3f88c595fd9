//! C9 — Command Dispatch, top level (§4.9).
//!
//! Flag rejections called out explicitly (`--page`/
//! `--page-size` invalid on `status`/`tasks ls`; `--state` invalid on
//! any `ssm-runs` subcommand; `ssm-runs` requires an explicit `ls`/
//! `show`) are all enforced structurally by the `clap` arg structs in
//! [`crate::args`] — those flags simply aren't fields there, and
//! `SsmRunsCommand` has no "no subcommand" variant — so this module
//! only coordinates fetch → transform → render.

use is_terminal::IsTerminal;
use tctl_discovery_backend::{CancelScope, DiscoveryConfigsClient, EventsClient, UserTasksClient};
use tctl_discovery_types::Result;

use crate::args::{Cli, DiscoveryCommand, SsmRunsCommand, TasksCommand, TopCommand};
use crate::color::Colorizer;
use crate::handlers;

/// Runs one subcommand to completion against the given backend clients,
/// returning the fully rendered output (text, JSON, or YAML) as a
/// string (§5 "fetch → transform → render → exit").
pub fn run_with_clients(
    cli: Cli,
    tasks_client: &dyn UserTasksClient,
    configs_client: &dyn DiscoveryConfigsClient,
    events_client: &dyn EventsClient,
    scope: &CancelScope,
) -> Result<String> {
    let colors = Colorizer::from_env(std::io::stdout().is_terminal());
    let log_level = cli.log_level;

    let TopCommand::Discovery(command) = cli.command;
    match command {
        DiscoveryCommand::Status(args) => {
            handlers::status::handle(&args, tasks_client, configs_client, scope, &colors, log_level)
        }
        DiscoveryCommand::Tasks(TasksCommand::Ls(args)) => {
            handlers::tasks::handle_ls(&args, tasks_client, scope, &colors, log_level)
        }
        DiscoveryCommand::Tasks(TasksCommand::Show(args)) => {
            handlers::tasks::handle_show(&args, tasks_client, scope, &colors, log_level)
        }
        DiscoveryCommand::SsmRuns(SsmRunsCommand::Ls(args)) => {
            handlers::ssm_runs::handle_ls(&args, events_client, scope, &colors, log_level)
        }
        DiscoveryCommand::SsmRuns(SsmRunsCommand::Show(args)) => {
            handlers::ssm_runs::handle_show(&args, events_client, scope, &colors, log_level)
        }
    }
}

/// Entry point used by `main.rs`: wires the standalone binary's
/// (unconnected, §1) clients, runs the parsed command, and prints the
/// result to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let client = crate::clients::UnconnectedClient;
    let scope = CancelScope::new();

    let cancel_scope = scope.clone();
    let _ = ctrlc::set_handler(move || cancel_scope.cancel());

    let output = run_with_clients(cli, &client, &client, &client, &scope)?;
    println!("{output}");
    Ok(())
}
