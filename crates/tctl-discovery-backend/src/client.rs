use chrono::{DateTime, Utc};
use tctl_discovery_types::{DiscoveryConfig, UserTask};

use crate::model::Event;
use crate::scope::CancelScope;

/// One page of `UserTasksList` results (§6.1).
#[derive(Debug, Clone, Default)]
pub struct UserTasksPage {
    pub items: Vec<UserTask>,
    /// Empty string means there is no next page.
    pub next_page_token: String,
}

/// Consumed by `tasks ls`, `tasks show`, and `status`.
///
/// A blank `state` means "all"; a blank `integration` means "no filter".
/// Interface only — no implementation ships in this subsystem (§1).
pub trait UserTasksClient {
    fn list_user_tasks(
        &self,
        scope: &CancelScope,
        limit: usize,
        page_token: &str,
        integration: &str,
        state: &str,
    ) -> anyhow::Result<UserTasksPage>;
}

/// One page of `DiscoveryConfigsList` results (§6.2).
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfigsPage {
    pub items: Vec<DiscoveryConfig>,
    pub next_page_token: String,
}

/// Consumed by `status`.
pub trait DiscoveryConfigsClient {
    fn list_discovery_configs(
        &self,
        scope: &CancelScope,
        limit: usize,
        page_token: &str,
    ) -> anyhow::Result<DiscoveryConfigsPage>;
}

/// A `SearchEvents` query window (§6.3). `event_types` is fixed to
/// `[SSMRun]` and `order` fixed to descending for every caller in this
/// subsystem, so neither is a field here — only the parts callers vary.
#[derive(Debug, Clone)]
pub struct SearchEventsQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub limit: usize,
    /// Empty string means "start from the most recent event".
    pub start_key: String,
}

/// One page of `SearchEvents` results (§6.3).
#[derive(Debug, Clone, Default)]
pub struct SearchEventsPage {
    pub events: Vec<Event>,
    /// Empty string means there is no next page.
    pub next_start_key: String,
}

/// Consumed by `ssm-runs ls` and `ssm-runs show`.
pub trait EventsClient {
    fn search_events(
        &self,
        scope: &CancelScope,
        query: &SearchEventsQuery,
    ) -> anyhow::Result<SearchEventsPage>;
}
