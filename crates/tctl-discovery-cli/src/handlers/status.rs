//! `discovery status` (§4.9 bullet 1).

use tctl_discovery_backend::{CancelScope, DiscoveryConfigsClient, UserTasksClient};
use tctl_discovery_engine::next_action::task_list_actions;
use tctl_discovery_engine::task::{normalize_task_state, task_matches_filter};
use tctl_discovery_types::{Result, TaskFilter};

use crate::args::{LogLevel, StatusArgs};
use crate::clients::{list_all_discovery_configs, list_all_user_tasks};
use crate::color::Colorizer;
use crate::router::route;
use crate::text::render_status;

pub fn handle(
    args: &StatusArgs,
    tasks_client: &dyn UserTasksClient,
    configs_client: &dyn DiscoveryConfigsClient,
    scope: &CancelScope,
    colors: &Colorizer,
    log_level: LogLevel,
) -> Result<String> {
    let filtered_state = normalize_task_state(&args.state)?;

    // `allTasks` drives the open/resolved totals, so it is fetched with
    // no state filter; `filteredTasks` is derived in-memory (§4.5).
    let all_tasks = list_all_user_tasks(tasks_client, scope, "", "", log_level)?;

    let filter = TaskFilter {
        state: filtered_state.clone(),
        integration: args.integration.clone(),
        task_type: String::new(),
        issue_type: String::new(),
    };
    let filtered_tasks: Vec<_> = all_tasks
        .iter()
        .filter(|t| task_matches_filter(t, &filter))
        .cloned()
        .collect();

    let configs = list_all_discovery_configs(configs_client, scope, log_level)?;

    let summary = tctl_discovery_engine::build_status_summary(
        &all_tasks,
        &filtered_tasks,
        &configs,
        &filtered_state,
    );

    let actions = task_list_actions(&summary.tasks, &filter);

    route(args.format, &summary, Some(|s: &tctl_discovery_types::StatusSummary| {
        render_status(s, colors, &actions)
    }))
}
