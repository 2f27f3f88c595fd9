//! Wiring for the external control-plane collaborator (§1, §6).
//!
//! `tctl-discovery-backend` defines the three client traits as
//! interfaces only — no implementation ships in this subsystem; the
//! surrounding `tctl` binary supplies one backed by its gRPC connection
//! (authentication and connection setup are explicitly out of scope,
//! §1). [`UnconnectedClient`] is the seam: it satisfies all three
//! traits so `tctl-discovery` links and runs standalone, but every call
//! fails fast with a message pointing at the real wiring point instead
//! of silently returning empty data.

use tctl_discovery_backend::{
    CancelScope, DiscoveryConfigsClient, DiscoveryConfigsPage, EventsClient, SearchEventsPage,
    SearchEventsQuery, UserTasksClient, UserTasksPage,
};

use crate::args::LogLevel;

/// `--log-level` gates nothing but these traces (§4.9, "Logging"):
/// there is no tracing/log framework in this subsystem, only a cosmetic
/// page-fetch progress line on stderr when the caller asked for
/// `debug`.
fn trace_page(log_level: LogLevel, what: &str, count: usize, has_next: bool) {
    if log_level == LogLevel::Debug {
        eprintln!("[debug] fetched {count} {what}, has_next={has_next}");
    }
}

const NOT_WIRED: &str = "tctl-discovery has no control-plane backend wired up: the surrounding \
    tctl binary must supply a UserTasksClient/DiscoveryConfigsClient/EventsClient \
    implementation (see tctl_discovery_backend::client)";

/// Default client used by the standalone `tctl-discovery` binary.
pub struct UnconnectedClient;

impl UserTasksClient for UnconnectedClient {
    fn list_user_tasks(
        &self,
        _scope: &CancelScope,
        _limit: usize,
        _page_token: &str,
        _integration: &str,
        _state: &str,
    ) -> anyhow::Result<UserTasksPage> {
        anyhow::bail!(NOT_WIRED)
    }
}

impl DiscoveryConfigsClient for UnconnectedClient {
    fn list_discovery_configs(
        &self,
        _scope: &CancelScope,
        _limit: usize,
        _page_token: &str,
    ) -> anyhow::Result<DiscoveryConfigsPage> {
        anyhow::bail!(NOT_WIRED)
    }
}

impl EventsClient for UnconnectedClient {
    fn search_events(
        &self,
        _scope: &CancelScope,
        _query: &SearchEventsQuery,
    ) -> anyhow::Result<SearchEventsPage> {
        anyhow::bail!(NOT_WIRED)
    }
}

/// Every page request in this subsystem asks for at most this many
/// items at a time (§4.9 "the SSM fetch loop requests pages of at most
/// 200 events").
pub const MAX_PAGE_LIMIT: usize = 200;

/// Drains a `UserTasksClient` through every page via
/// [`tctl_discovery_backend::PagedResourceIterator`], checking `scope`
/// for cancellation between pages (§5).
pub fn list_all_user_tasks(
    client: &dyn UserTasksClient,
    scope: &CancelScope,
    integration: &str,
    state: &str,
    log_level: LogLevel,
) -> anyhow::Result<Vec<tctl_discovery_types::UserTask>> {
    let iter = tctl_discovery_backend::PagedResourceIterator::new(|token| {
        scope.check()?;
        let page = client.list_user_tasks(scope, MAX_PAGE_LIMIT, token, integration, state)?;
        trace_page(log_level, "user tasks", page.items.len(), !page.next_page_token.is_empty());
        Ok((page.items, page.next_page_token))
    });
    iter.collect()
}

/// Drains a `DiscoveryConfigsClient` through every page (§4.9 "lists
/// discovery configs (full pagination via stream)").
pub fn list_all_discovery_configs(
    client: &dyn DiscoveryConfigsClient,
    scope: &CancelScope,
    log_level: LogLevel,
) -> anyhow::Result<Vec<tctl_discovery_types::DiscoveryConfig>> {
    let iter = tctl_discovery_backend::PagedResourceIterator::new(|token| {
        scope.check()?;
        let page = client.list_discovery_configs(scope, MAX_PAGE_LIMIT, token)?;
        trace_page(log_level, "discovery configs", page.items.len(), !page.next_page_token.is_empty());
        Ok((page.items, page.next_page_token))
    });
    iter.collect()
}

/// Fetches SSM audit events in reverse-chronological pages capped at
/// [`MAX_PAGE_LIMIT`] each, stopping once `limit` events have been
/// collected or the server returns an empty page / no next key (§4.9).
pub fn fetch_ssm_events(
    client: &dyn EventsClient,
    scope: &CancelScope,
    since: chrono::Duration,
    limit: usize,
    log_level: LogLevel,
) -> anyhow::Result<Vec<tctl_discovery_backend::Event>> {
    let to = chrono::Utc::now();
    let from = to - since;

    let mut collected = Vec::new();
    let mut start_key = String::new();
    while collected.len() < limit {
        scope.check()?;
        let page_limit = (limit - collected.len()).min(MAX_PAGE_LIMIT);
        let query = SearchEventsQuery {
            from,
            to,
            limit: page_limit,
            start_key: std::mem::take(&mut start_key),
        };
        let page = client.search_events(scope, &query)?;
        trace_page(log_level, "SSM events", page.events.len(), !page.next_start_key.is_empty());
        if page.events.is_empty() {
            break;
        }
        collected.extend(page.events);
        if page.next_start_key.is_empty() {
            break;
        }
        start_key = page.next_start_key;
    }
    collected.truncate(limit);
    Ok(collected)
}
