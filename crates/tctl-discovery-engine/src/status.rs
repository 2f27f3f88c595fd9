//! C5 — Status Aggregator (§4.5).

use chrono::Utc;
use tctl_discovery_types::{
    ConfigStatusRow, DiscoveryConfig, IntegrationResourceSummary, StatusSummary, UserTask,
};

use crate::task::{project_task, sort_task_list_items};

/// Joins `all_tasks` + `filtered_tasks` + `configs` into a single
/// `StatusSummary` (§4.5). `filtered_state` is the state filter in
/// effect, or `"ALL"` when none (callers pass the empty-string "no
/// filter" encoding and this function performs the substitution).
pub fn build_status_summary(
    all_tasks: &[UserTask],
    filtered_tasks: &[UserTask],
    configs: &[DiscoveryConfig],
    filtered_state: &str,
) -> StatusSummary {
    let open_tasks = all_tasks
        .iter()
        .filter(|t| t.state == tctl_discovery_types::TaskState::Open)
        .count();
    let resolved_tasks = all_tasks.len() - open_tasks;

    let mut tasks_by_type = std::collections::BTreeMap::new();
    let mut tasks_by_issue = std::collections::BTreeMap::new();
    let mut tasks_by_integration = std::collections::BTreeMap::new();
    for task in filtered_tasks {
        *tasks_by_type.entry(task.task_type.clone()).or_insert(0usize) += 1;
        *tasks_by_issue.entry(task.issue_type.clone()).or_insert(0usize) += 1;
        *tasks_by_integration
            .entry(task.integration.clone())
            .or_insert(0usize) += 1;
    }

    let mut tasks: Vec<_> = filtered_tasks.iter().map(project_task).collect();
    sort_task_list_items(&mut tasks);

    let mut config_rows: Vec<ConfigStatusRow> = configs.iter().map(project_config).collect();
    config_rows.sort_by(|a, b| a.name.cmp(&b.name));

    let mut integration_resource_stats = std::collections::BTreeMap::new();
    for config in configs {
        for family in config.status.families() {
            for (integration, summary) in family {
                integration_resource_stats
                    .entry(integration.clone())
                    .or_insert_with(IntegrationResourceSummary::default)
                    .add(summary);
            }
        }
    }

    StatusSummary {
        generated_at: Utc::now(),
        filtered_state: if filtered_state.is_empty() {
            "ALL".to_string()
        } else {
            filtered_state.to_string()
        },
        total_tasks: all_tasks.len(),
        open_tasks,
        resolved_tasks,
        tasks,
        tasks_by_type,
        tasks_by_issue,
        tasks_by_integration,
        configs: config_rows,
        integration_resource_stats,
    }
}

/// Projects a `DiscoveryConfig` into its status-view row. `state`
/// defaults to `"UNKNOWN"` when blank (§4.5).
fn project_config(config: &DiscoveryConfig) -> ConfigStatusRow {
    ConfigStatusRow {
        name: config.name.clone(),
        group: config.group.clone(),
        state: if config.state.trim().is_empty() {
            "UNKNOWN".to_string()
        } else {
            config.state.clone()
        },
        discovered_resource_count: config.discovered_resource_count,
        last_sync: config.last_sync,
    }
}
