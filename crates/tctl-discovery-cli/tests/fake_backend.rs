//! In-memory stand-ins for the three backend client traits (§6),
//! shared by the end-to-end dispatch tests. Single-page by default;
//! [`FakeBackend::paged`] splits the task list across two pages to
//! exercise [`tctl_discovery_cli::clients::list_all_user_tasks`]'s
//! draining loop.

use tctl_discovery_backend::{
    CancelScope, DiscoveryConfigsClient, DiscoveryConfigsPage, EventsClient, SearchEventsPage,
    SearchEventsQuery, UserTasksClient, UserTasksPage,
};
use tctl_discovery_backend::Event;
use tctl_discovery_types::{DiscoveryConfig, UserTask};

#[derive(Default)]
pub struct FakeBackend {
    pub tasks: Vec<UserTask>,
    pub configs: Vec<DiscoveryConfig>,
    pub events: Vec<Event>,
    /// When `Some(n)`, `list_user_tasks` hands back at most `n` items per
    /// call and a non-empty `next_page_token` until exhausted.
    pub task_page_size: Option<usize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserTasksClient for FakeBackend {
    fn list_user_tasks(
        &self,
        _scope: &CancelScope,
        _limit: usize,
        page_token: &str,
        integration: &str,
        state: &str,
    ) -> anyhow::Result<UserTasksPage> {
        let filtered: Vec<UserTask> = self
            .tasks
            .iter()
            .filter(|t| integration.is_empty() || t.integration == integration)
            .filter(|t| state.is_empty() || t.state.as_str() == state)
            .cloned()
            .collect();

        let Some(page_size) = self.task_page_size else {
            return Ok(UserTasksPage {
                items: filtered,
                next_page_token: String::new(),
            });
        };

        let start: usize = page_token.parse().unwrap_or(0);
        let end = (start + page_size).min(filtered.len());
        let items = filtered[start..end].to_vec();
        let next_page_token = if end < filtered.len() {
            end.to_string()
        } else {
            String::new()
        };
        Ok(UserTasksPage { items, next_page_token })
    }
}

impl DiscoveryConfigsClient for FakeBackend {
    fn list_discovery_configs(
        &self,
        _scope: &CancelScope,
        _limit: usize,
        _page_token: &str,
    ) -> anyhow::Result<DiscoveryConfigsPage> {
        Ok(DiscoveryConfigsPage {
            items: self.configs.clone(),
            next_page_token: String::new(),
        })
    }
}

impl EventsClient for FakeBackend {
    fn search_events(
        &self,
        _scope: &CancelScope,
        query: &SearchEventsQuery,
    ) -> anyhow::Result<SearchEventsPage> {
        let items: Vec<Event> = self.events.iter().take(query.limit).cloned().collect();
        Ok(SearchEventsPage {
            events: items,
            next_start_key: String::new(),
        })
    }
}
