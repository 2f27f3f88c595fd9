//! C8 — Next-Action Engine (§4.8).
//!
//! Each suggested block prints as `# <comment>` followed by one indented
//! command per line (§4.8); this module only computes the data, leaving
//! the exact indentation/formatting to the text renderer (C7).

use tctl_discovery_types::{PageInfo, SsmVmGroup, TaskFilter, TaskListItem, TASK_TYPE_EC2};

use crate::pagination::with_page_flag;
use crate::time::shorten_name;

/// One suggested-action block: a one-line rationale plus the command(s)
/// that act on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionGroup {
    pub comment: String,
    pub commands: Vec<String>,
}

fn group(comment: &str, commands: Vec<String>) -> ActionGroup {
    ActionGroup {
        comment: comment.to_string(),
        commands,
    }
}

/// Empty result set ⇒ suggest broadening filters, adding `--state=all`
/// when the current state is (or defaults to) `OPEN`. Non-empty ⇒ up to
/// three blocks: adjust filters (only the dimensions not already set),
/// inspect one task in detail, and machine-readable output (§4.8).
pub fn task_list_actions(tasks: &[TaskListItem], filter: &TaskFilter) -> Vec<ActionGroup> {
    if tasks.is_empty() {
        let mut commands = vec!["tctl discovery tasks ls".to_string()];
        if filter.state.is_empty() || filter.state == "OPEN" {
            commands.push("tctl discovery tasks ls --state=all".to_string());
        }
        return vec![group("Broaden your task list filters", commands)];
    }

    let mut groups = Vec::new();

    let mut filter_commands = Vec::new();
    if filter.state.is_empty() {
        filter_commands.push("tctl discovery tasks ls --state=resolved".to_string());
    }
    if filter.task_type.is_empty() {
        filter_commands.push(format!(
            "tctl discovery tasks ls --task-type={}",
            tasks[0].task_type
        ));
    }
    if filter.integration.is_empty() && !tasks[0].integration.is_empty() {
        filter_commands.push(format!(
            "tctl discovery tasks ls --integration={}",
            tasks[0].integration
        ));
    }
    if !filter_commands.is_empty() {
        groups.push(group("Adjust task list filters", filter_commands));
    }

    let prefix = shorten_name(&tasks[0].name);
    groups.push(group(
        "Inspect one task in detail",
        vec![format!("tctl discovery tasks show {prefix}")],
    ));

    groups.push(group(
        "Use machine-readable output",
        vec![
            "tctl discovery tasks ls --format=json".to_string(),
            "tctl discovery tasks ls --format=yaml".to_string(),
        ],
    ));

    groups
}

/// `show_cmd` is the base `tasks show <prefix> [--page-size=… --page=…]`
/// command the caller dispatched; page-rewriting reuses it verbatim
/// (§4.8, §8 scenarios 2–3). `ec2_instance_ids` is empty unless
/// `task_type == discover-ec2`, in which case the lexicographically
/// first id is offered for an SSM cross-reference.
pub fn task_detail_actions(
    integration: &str,
    task_type: &str,
    ec2_instance_ids: &[String],
    page_info: &PageInfo,
    show_cmd: &str,
) -> Vec<ActionGroup> {
    let mut groups = Vec::new();

    let slice_is_empty = page_info.start == page_info.end;
    if slice_is_empty && page_info.total > 0 {
        groups.push(group(
            "Current resource page is out of range",
            vec![with_page_flag(show_cmd, 1)],
        ));
    } else if page_info.has_next {
        groups.push(group(
            "Show next page",
            vec![with_page_flag(show_cmd, page_info.next_page)],
        ));
    }

    if !integration.is_empty() {
        groups.push(group(
            "See tasks for the same integration",
            vec![format!(
                "tctl discovery tasks ls --integration={integration}"
            )],
        ));
    }

    if task_type == TASK_TYPE_EC2 {
        if let Some(instance_id) = ec2_instance_ids.iter().min() {
            groups.push(group(
                "Check SSM runs for this instance",
                vec![format!("tctl discovery ssm-runs show {instance_id}")],
            ));
        }
    }

    groups.push(group(
        "Return to discovery overview",
        vec!["tctl discovery status".to_string()],
    ));

    groups.push(group(
        "Use machine-readable output",
        vec![
            format!("{show_cmd} --format=json"),
            format!("{show_cmd} --format=yaml"),
        ],
    ));

    groups
}

/// `since` is the effective `--since` window already validated by the
/// dispatcher (§4.8).
pub fn ssm_list_actions(failing_groups: &[SsmVmGroup], since: &str) -> Vec<ActionGroup> {
    let mut groups = vec![group(
        "Start with SSM overview",
        vec![
            "tctl discovery ssm-runs ls".to_string(),
            format!("tctl discovery ssm-runs ls --since={since}"),
            format!("tctl discovery ssm-runs ls --since={since} --failed"),
        ],
    )];

    if let Some(failing) = failing_groups.first() {
        groups.push(group(
            "View all runs for a specific failing instance",
            vec![format!(
                "tctl discovery ssm-runs show {}",
                failing.instance_id
            )],
        ));
    }

    groups.push(group(
        "Inspect the discovery tasks themselves",
        vec!["tctl discovery tasks ls".to_string()],
    ));

    groups.push(group(
        "Use machine-readable output",
        vec![
            "tctl discovery ssm-runs ls --format=json".to_string(),
            "tctl discovery ssm-runs ls --format=yaml".to_string(),
        ],
    ));

    groups
}

pub fn ssm_show_actions(instance_id: &str, show_all: bool) -> Vec<ActionGroup> {
    let mut groups = vec![group(
        "Return to SSM overview",
        vec!["tctl discovery ssm-runs ls".to_string()],
    )];

    if !show_all {
        groups.push(group(
            "Show full run history for this instance",
            vec![format!(
                "tctl discovery ssm-runs show {instance_id} --show-all-runs"
            )],
        ));
    }

    groups.push(group(
        "Inspect the discovery tasks themselves",
        vec!["tctl discovery tasks ls".to_string()],
    ));

    groups.push(group(
        "Use machine-readable output",
        vec![
            format!("tctl discovery ssm-runs show {instance_id} --format=json"),
            format!("tctl discovery ssm-runs show {instance_id} --format=yaml"),
        ],
    ));

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tctl_discovery_types::TaskState;

    fn item(name: &str, task_type: &str, integration: &str) -> TaskListItem {
        TaskListItem {
            name: name.to_string(),
            state: TaskState::Open,
            task_type: task_type.to_string(),
            issue_type: "ec2-ssm-agent-not-reachable".to_string(),
            affected: 1,
            integration: integration.to_string(),
            last_state_change: None,
        }
    }

    #[test]
    fn scenario_one_suggests_show_and_format_flags() {
        let tasks = vec![item(
            "e785789e-1234-4abc-9def-0123456789ab",
            TASK_TYPE_EC2,
            "i1",
        )];
        let filter = TaskFilter {
            state: "OPEN".to_string(),
            ..Default::default()
        };
        let groups = task_list_actions(&tasks, &filter);
        let all_commands: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.commands.iter())
            .map(String::as_str)
            .collect();
        assert!(all_commands
            .iter()
            .any(|c| c.starts_with("tctl discovery tasks show e785789e")));
        assert!(all_commands.contains(&"tctl discovery tasks ls --format=json"));
        assert!(all_commands.contains(&"tctl discovery tasks ls --format=yaml"));
    }

    #[test]
    fn empty_task_list_suggests_state_all_only_when_open() {
        let groups = task_list_actions(
            &[],
            &TaskFilter {
                state: "OPEN".to_string(),
                ..Default::default()
            },
        );
        assert!(groups[0]
            .commands
            .contains(&"tctl discovery tasks ls --state=all".to_string()));

        let groups = task_list_actions(
            &[],
            &TaskFilter {
                state: "RESOLVED".to_string(),
                ..Default::default()
            },
        );
        assert!(!groups[0]
            .commands
            .contains(&"tctl discovery tasks ls --state=all".to_string()));
    }

    #[test]
    fn scenario_two_suggests_next_page_without_duplicating_flag() {
        let info = PageInfo {
            page: 1,
            page_size: 2,
            total: 3,
            start: 0,
            end: 2,
            remaining: 1,
            has_next: true,
            next_page: 2,
        };
        let groups = task_detail_actions(
            "",
            TASK_TYPE_EC2,
            &[],
            &info,
            "tctl discovery tasks show abc --page-size=2 --page=1",
        );
        let next_page_cmd = &groups[0].commands[0];
        assert_eq!(next_page_cmd.matches("--page=").count(), 1);
        assert!(next_page_cmd.ends_with("--page=2"));
    }

    #[test]
    fn scenario_three_out_of_range_rewrites_to_page_one() {
        let info = PageInfo {
            page: 999,
            page_size: 25,
            total: 2,
            start: 2,
            end: 2,
            remaining: 0,
            has_next: false,
            next_page: 1000,
        };
        let groups = task_detail_actions(
            "",
            TASK_TYPE_EC2,
            &[],
            &info,
            "tctl discovery tasks show abc --page=999",
        );
        assert_eq!(groups[0].comment, "Current resource page is out of range");
        assert!(groups[0].commands[0].ends_with("--page=1"));
    }

    #[test]
    fn ec2_instance_suggestion_uses_lexicographically_first_id() {
        let info = PageInfo {
            page: 1,
            page_size: 25,
            total: 2,
            start: 0,
            end: 2,
            remaining: 0,
            has_next: false,
            next_page: 2,
        };
        let ids = vec!["i-002".to_string(), "i-001".to_string()];
        let groups =
            task_detail_actions("", TASK_TYPE_EC2, &ids, &info, "tctl discovery tasks show abc");
        let ssm_group = groups
            .iter()
            .find(|g| g.comment == "Check SSM runs for this instance")
            .unwrap();
        assert_eq!(ssm_group.commands[0], "tctl discovery ssm-runs show i-001");
    }

    #[test]
    fn ssm_show_only_suggests_full_history_when_not_already_showing_all() {
        let groups = ssm_show_actions("i-1", false);
        assert!(groups
            .iter()
            .any(|g| g.comment == "Show full run history for this instance"));

        let groups = ssm_show_actions("i-1", true);
        assert!(!groups
            .iter()
            .any(|g| g.comment == "Show full run history for this instance"));
    }

    #[test]
    fn ssm_list_actions_include_overview_and_failing_instance() {
        let record = tctl_discovery_types::SsmRunRecord {
            event_time_raw: "2024-01-01T00:00:00Z".to_string(),
            event_time: Some(Utc.timestamp_opt(0, 0).unwrap()),
            code: "TDS00W".to_string(),
            instance_id: "i-9".to_string(),
            status: "Failed".to_string(),
            exit_code: -1,
            account_id: String::new(),
            region: String::new(),
            command_id: String::new(),
            invocation_url: String::new(),
            stderr: String::new(),
        };
        let group = SsmVmGroup {
            instance_id: "i-9".to_string(),
            most_recent: record.clone(),
            most_recent_failed: true,
            total: 1,
            failed: 1,
            success: 0,
            runs: vec![record],
        };
        let groups = ssm_list_actions(&[group], "1h");
        assert!(groups
            .iter()
            .any(|g| g.comment == "View all runs for a specific failing instance"));
    }
}
