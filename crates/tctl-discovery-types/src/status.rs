use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::IntegrationResourceSummary;
use crate::task::TaskState;

/// A `UserTask` projected into the flat shape the renderers consume
/// (§3 `StatusSummary`, §4.3 "project into a flat list item").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListItem {
    pub name: String,
    pub state: TaskState,
    pub task_type: String,
    pub issue_type: String,
    pub affected: usize,
    pub integration: String,
    pub last_state_change: Option<DateTime<Utc>>,
}

/// A `DiscoveryConfig` projected for the status view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigStatusRow {
    pub name: String,
    pub group: String,
    /// Defaults to `"UNKNOWN"` when the source state was blank (§4.5).
    pub state: String,
    pub discovered_resource_count: u64,
    pub last_sync: Option<DateTime<Utc>>,
}

/// The fused view joining tasks, discovery configs, and per-integration
/// resource aggregates (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    pub generated_at: DateTime<Utc>,
    /// The state filter in effect, or `"ALL"` when none.
    pub filtered_state: String,

    pub total_tasks: usize,
    pub open_tasks: usize,
    pub resolved_tasks: usize,

    pub tasks: Vec<TaskListItem>,
    pub tasks_by_type: BTreeMap<String, usize>,
    pub tasks_by_issue: BTreeMap<String, usize>,
    pub tasks_by_integration: BTreeMap<String, usize>,

    pub configs: Vec<ConfigStatusRow>,

    /// Keyed by integration name; blank key is ambient credentials.
    pub integration_resource_stats: BTreeMap<String, IntegrationResourceSummary>,
}
