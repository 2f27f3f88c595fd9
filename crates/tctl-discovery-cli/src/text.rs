//! C7 — Text Renderer (§4.7).

use tctl_discovery_engine::next_action::ActionGroup;
use tctl_discovery_engine::ssm::build_vm_history_rows;
use tctl_discovery_engine::task::friendly_task_type;
use tctl_discovery_engine::time::{format_expiry, format_relative, humanize_enum, normalize_help_text};
use tctl_discovery_types::{
    AzureVmResource, Ec2Instance, EksCluster, PageInfo, RdsDatabase, SsmAnalysis, SsmVmGroup,
    StatusSummary, TaskListItem, UserTask,
};

use crate::color::Colorizer;
use crate::table::{render_kv_block, render_table};

fn display_integration(name: &str) -> String {
    if name.is_empty() {
        "none (ambient credentials)".to_string()
    } else {
        name.to_string()
    }
}

fn range_text(info: &PageInfo) -> String {
    if info.start == info.end {
        "0-0".to_string()
    } else {
        format!("{}-{}", info.start + 1, info.end)
    }
}

/// Each block prints as `# <comment>` followed by one indented command
/// per line, blocks separated by a blank line (§4.8).
pub fn render_actions(actions: &[ActionGroup]) -> String {
    let mut out = String::from("Next actions:\n\n");
    out.push_str(
        &actions
            .iter()
            .map(|group| {
                let mut block = format!("# {}", group.comment);
                for cmd in &group.commands {
                    block.push_str(&format!("\n  {cmd}"));
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    );
    out.push('\n');
    out
}

/// Known fix descriptions, keyed by issue-type. Markdown source,
/// rendered through [`normalize_help_text`] before display.
fn known_fix(issue_type: &str) -> Option<&'static str> {
    match issue_type {
        "ec2-ssm-agent-not-reachable" => Some(
            "**Reachability**\n\nConfirm the [SSM agent](https://docs.aws.amazon.com/systems-manager/latest/userguide/prereqs-ssm-agent.html) is installed and running, and that the instance has outbound network access to the SSM endpoints.",
        ),
        "ec2-ssm-invocation-failed" => Some(
            "**Invocation failure**\n\nCheck the `invocation_url` for the most recent run and confirm the instance profile grants `ssm:SendCommand`.",
        ),
        "eks-access-entry-missing" => Some(
            "**Access entry missing**\n\nGrant the integration's IAM role an [EKS access entry](https://docs.aws.amazon.com/eks/latest/userguide/access-entries.html) for this cluster.",
        ),
        "rds-iam-auth-disabled" => Some(
            "**IAM authentication disabled**\n\nEnable IAM database authentication on the instance and grant the integration's role the `rds-db:connect` action.",
        ),
        "azure-vm-extension-failed" => Some(
            "**Extension install failed**\n\nVerify the VM's managed identity and retry the discovery agent extension install.",
        ),
        _ => None,
    }
}

/// Status view layout (§4.7).
pub fn render_status(summary: &StatusSummary, colors: &Colorizer, actions: &[ActionGroup]) -> String {
    let mut out = String::new();
    out.push_str(&colors.section_header(&format!(
        "User Tasks [{} total, {} open, {} resolved]",
        summary.total_tasks, summary.open_tasks, summary.resolved_tasks
    )));
    out.push('\n');
    out.push_str(&format!("Filter: state={}\n\n", summary.filtered_state));

    if summary.tasks.is_empty() {
        out.push_str(&colors.warning("No user tasks match the current filters.\n"));
    } else {
        let headers = [
            "Name",
            "State",
            "TaskType",
            "IssueType",
            "Affected",
            "Integration",
            "Last State Change",
        ];
        let rows: Vec<Vec<String>> = summary
            .tasks
            .iter()
            .map(|t| {
                vec![
                    t.name.clone(),
                    colors.status_token(t.state.as_str()),
                    friendly_task_type(&t.task_type),
                    t.issue_type.clone(),
                    t.affected.to_string(),
                    display_integration(&t.integration),
                    format_relative(t.last_state_change, None, false),
                ]
            })
            .collect();
        out.push_str(&render_table(&headers, &rows));
        out.push('\n');
    }

    if !summary.configs.is_empty() {
        let groups: std::collections::BTreeSet<&str> =
            summary.configs.iter().map(|c| c.group.as_str()).collect();
        out.push_str(&format!(
            "\n{}\n",
            colors.section_header(&format!(
                "Discovery Configs [{} total, {} group(s)]",
                summary.configs.len(),
                groups.len()
            ))
        ));
        let headers = ["Name", "Group", "State", "Discovered", "Last Sync"];
        let rows: Vec<Vec<String>> = summary
            .configs
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.group.clone(),
                    colors.status_token(&humanize_enum(&c.state)),
                    colors.discovered_count(c.discovered_resource_count),
                    format_relative(c.last_sync, None, false),
                ]
            })
            .collect();
        out.push_str(&render_table(&headers, &rows));
        out.push('\n');
    }

    if !summary.integration_resource_stats.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            colors.section_header(&format!(
                "Integration Resource Status [{} total]",
                summary.integration_resource_stats.len()
            ))
        ));
        let headers = ["Integration", "Found", "Enrolled", "Awaiting Join", "Failed"];
        let rows: Vec<Vec<String>> = summary
            .integration_resource_stats
            .iter()
            .map(|(name, stats)| {
                vec![
                    display_integration(name),
                    stats.found.to_string(),
                    stats.enrolled.to_string(),
                    stats.awaiting_join().to_string(),
                    colors.failed_count(stats.failed),
                ]
            })
            .collect();
        out.push_str(&render_table(&headers, &rows));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_actions(actions));
    out
}

/// Task list layout (§4.7).
pub fn render_task_list(items: &[TaskListItem], colors: &Colorizer, actions: &[ActionGroup]) -> String {
    let mut out = String::new();
    out.push_str(&colors.section_header(&format!("User Tasks [{} matching filters]", items.len())));
    out.push('\n');

    if items.is_empty() {
        out.push_str(&colors.warning("No user tasks match the current filters.\n"));
    } else {
        for (i, item) in items.iter().enumerate() {
            out.push_str(&format!("\n[{}] TASK: {}\n", i + 1, item.name));
            let pairs = vec![
                ("STATE", colors.status_token(item.state.as_str())),
                ("TYPE", friendly_task_type(&item.task_type)),
                ("ISSUE TYPE", item.issue_type.clone()),
                ("AFFECTED", item.affected.to_string()),
                ("INTEGRATION", display_integration(&item.integration)),
                (
                    "LAST STATE CHANGE",
                    format_relative(item.last_state_change, None, false),
                ),
            ];
            out.push_str(&render_kv_block(&pairs, 4));
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&render_actions(actions));
    out
}

pub fn render_ec2_instances(entries: &[(&String, &Ec2Instance)]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, (id, inst))| {
            let pairs = vec![
                ("INSTANCE ID", (*id).clone()),
                ("REGION", inst.region.clone()),
                ("ACCOUNT ID", inst.account_id.clone()),
                ("HOSTNAME", inst.hostname.clone()),
                ("ERROR", inst.error.clone().unwrap_or_default()),
            ];
            format!("[{}]\n{}", i + 1, render_kv_block(&pairs, 4))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_azure_vm_resources(entries: &[(&String, &AzureVmResource)]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, (name, vm))| {
            let pairs = vec![
                ("NAME", (*name).clone()),
                ("RESOURCE GROUP", vm.resource_group.clone()),
                ("SUBSCRIPTION ID", vm.subscription_id.clone()),
                ("REGION", vm.region.clone()),
                ("ERROR", vm.error.clone().unwrap_or_default()),
            ];
            format!("[{}]\n{}", i + 1, render_kv_block(&pairs, 4))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_eks_clusters(entries: &[(&String, &EksCluster)]) -> String {
    let headers = ["Name", "Region", "Account ID", "Error"];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|(_, c)| {
            vec![
                c.name.clone(),
                c.region.clone(),
                c.account_id.clone(),
                c.error.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&headers, &rows)
}

pub fn render_rds_databases(entries: &[(&String, &RdsDatabase)]) -> String {
    let headers = ["Name", "Engine", "Region", "Account ID", "Error"];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|(_, d)| {
            vec![
                d.name.clone(),
                d.engine.clone(),
                d.region.clone(),
                d.account_id.clone(),
                d.error.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&headers, &rows)
}

/// Task detail layout (§4.7). `resources_block` is whichever of the four
/// `render_*_instances/clusters/databases/resources` helpers above fits
/// the task's declared type, already paginated by the caller via
/// `tctl_discovery_engine::pagination::paginate`.
pub fn render_task_detail(
    task: &UserTask,
    resources_block: &str,
    page_info: &PageInfo,
    colors: &Colorizer,
    actions: &[ActionGroup],
) -> String {
    let mut out = String::new();
    let headers = ["Field", "Value"];
    let rows = vec![
        vec!["Name".to_string(), task.name.clone()],
        vec!["State".to_string(), colors.status_token(task.state.as_str())],
        vec!["Type".to_string(), friendly_task_type(&task.task_type)],
        vec!["Issue Type".to_string(), task.issue_type.clone()],
        vec!["Integration".to_string(), display_integration(&task.integration)],
        vec![
            "Last State Change".to_string(),
            format_relative(task.last_state_change, None, false),
        ],
        vec!["Expiry".to_string(), format_expiry(task.expiry, None)],
    ];
    out.push_str(&render_table(&headers, &rows));
    out.push('\n');

    if !resources_block.is_empty() {
        out.push('\n');
        out.push_str(resources_block);
        out.push('\n');
    }

    out.push_str(&format!(
        "\nShowing resources: {} of {}\n",
        range_text(page_info),
        page_info.total
    ));

    if let Some(fix) = known_fix(&task.issue_type) {
        out.push_str(&format!("\n{}\n", colors.section_header("How to fix:")));
        out.push_str(&normalize_help_text(fix));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_actions(actions));
    out
}

fn render_vm_summary_block(group: &SsmVmGroup, colors: &Colorizer) -> String {
    let pairs = vec![
        ("MOST RECENT FAILED", group.most_recent_failed.to_string()),
        ("TOTAL", group.total.to_string()),
        ("FAILED", colors.failed_count(group.failed as u64)),
        ("SUCCESS", group.success.to_string()),
    ];
    format!("  VM: {}\n{}", group.instance_id, render_kv_block(&pairs, 4))
}

fn render_run_history_multi(group: &SsmVmGroup, show_all: bool) -> String {
    let rows = build_vm_history_rows(group, show_all);
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let pairs = vec![
                ("TIMESTAMP", row.display_time.clone()),
                ("RESULT", row.result.clone()),
                ("COMMAND ID", row.command_id.clone()),
                ("EXIT CODE", row.exit_code.to_string()),
            ];
            format!("  RUN {}:\n{}", i + 1, render_kv_block(&pairs, 6))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// SSM-runs list (multi-VM) layout (§4.7).
#[allow(clippy::too_many_arguments)]
pub fn render_ssm_runs_list(
    since: &str,
    analysis: &SsmAnalysis,
    groups_page: &[SsmVmGroup],
    page_info: &PageInfo,
    show_all: bool,
    colors: &Colorizer,
    actions: &[ActionGroup],
) -> String {
    let mut out = String::new();
    out.push_str(&colors.section_header(&format!("SSM Runs [since={since}]")));
    out.push('\n');
    out.push_str(&format!(
        "Total: {}  Success: {}  Failed: {}\n",
        analysis.total,
        analysis.success,
        colors.failed_count(analysis.failed as u64)
    ));
    out.push_str(&format!(
        "Page {} (showing {} of {})\n",
        page_info.page,
        range_text(page_info),
        page_info.total
    ));

    if groups_page.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            colors.warning("No failing VMs in the current window.")
        ));
    } else {
        out.push_str(&format!("\n{}\n", colors.section_header("Failing VMs:")));
        for group in groups_page {
            out.push_str(&render_vm_summary_block(group, colors));
            out.push('\n');
        }

        out.push_str(&format!("\n{}\n", colors.section_header("Run history:")));
        for group in groups_page {
            out.push_str(&format!("  VM: {}\n", group.instance_id));
            out.push_str(&render_run_history_multi(group, show_all));
            out.push('\n');
        }
    }

    if page_info.has_next {
        out.push_str(&format!(
            "\n{}\n",
            colors.warning("More failing VMs available")
        ));
        out.push_str(&format!(
            "Next page: tctl discovery ssm-runs ls --page={}\n",
            page_info.next_page
        ));
    }

    out.push('\n');
    out.push_str(&render_actions(actions));
    out
}

/// SSM-runs show (single-instance) layout (§4.7).
pub fn render_ssm_runs_show(
    instance_id: &str,
    group: Option<&SsmVmGroup>,
    show_all: bool,
    colors: &Colorizer,
    actions: &[ActionGroup],
) -> String {
    let mut out = String::new();
    out.push_str(&colors.section_header(&format!("SSM Runs [instance={instance_id}]")));
    out.push('\n');

    match group {
        None => out.push_str(&format!(
            "\n{}\n",
            colors.warning("No SSM runs found for this instance in the current window.")
        )),
        Some(group) => {
            out.push_str(&format!("\nVM: {}\n", group.instance_id));
            let pairs = vec![
                ("MOST RECENT FAILED", group.most_recent_failed.to_string()),
                ("TOTAL", group.total.to_string()),
                ("FAILED", colors.failed_count(group.failed as u64)),
                ("SUCCESS", group.success.to_string()),
            ];
            out.push_str(&render_kv_block(&pairs, 4));
            out.push('\n');

            out.push_str(&format!("\n{}\n", colors.section_header("Run history:")));
            let rows = build_vm_history_rows(group, show_all);
            for (i, row) in rows.iter().enumerate() {
                out.push_str(&format!(
                    "[{}] {}: result={} command_id={} exit_code={}\n",
                    i + 1,
                    row.display_time,
                    row.result,
                    row.command_id,
                    row.exit_code
                ));
            }
        }
    }

    out.push('\n');
    out.push_str(&render_actions(actions));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tctl_discovery_engine::next_action::task_list_actions;
    use tctl_discovery_types::{TaskFilter, TaskPayload, TaskState};

    fn colors() -> Colorizer {
        Colorizer::new(false)
    }

    #[test]
    fn scenario_one_task_list_heading_and_fields() {
        let items = vec![TaskListItem {
            name: "e785789e-0000-4000-8000-000000000001".to_string(),
            state: TaskState::Open,
            task_type: "discover-ec2".to_string(),
            issue_type: "ec2-ssm-agent-not-reachable".to_string(),
            affected: 1,
            integration: "i1".to_string(),
            last_state_change: None,
        }];
        let actions = task_list_actions(&items, &TaskFilter::default());
        let rendered = render_task_list(&items, &colors(), &actions);
        assert!(rendered.contains("User Tasks [1 matching filters]"));
        assert!(rendered.contains("TYPE: AWS EC2"));
        assert!(rendered.contains("LAST STATE CHANGE: never"));
        assert!(rendered.contains("tctl discovery tasks show e785789e"));
        assert!(rendered.contains("--format=json"));
    }

    #[test]
    fn task_detail_shows_resource_range() {
        let task = UserTask {
            name: "abc".to_string(),
            state: TaskState::Open,
            task_type: "discover-ec2".to_string(),
            issue_type: "ec2-ssm-agent-not-reachable".to_string(),
            integration: String::new(),
            last_state_change: None,
            expiry: None,
            payload: TaskPayload::Unknown,
        };
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
        let rendered = render_task_detail(&task, "", &info, &colors(), &[]);
        assert!(rendered.contains("Showing resources: 1-2 of 3"));
        assert!(rendered.contains("How to fix:"));
    }

    #[test]
    fn task_detail_out_of_range_shows_zero_dash_zero() {
        let task = UserTask {
            name: "abc".to_string(),
            state: TaskState::Open,
            task_type: "discover-eks".to_string(),
            issue_type: "".to_string(),
            integration: String::new(),
            last_state_change: None,
            expiry: None,
            payload: TaskPayload::Unknown,
        };
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
        let rendered = render_task_detail(&task, "", &info, &colors(), &[]);
        assert!(rendered.contains("Showing resources: 0-0 of 2"));
    }

    #[test]
    fn status_view_lists_three_tables_in_order() {
        let summary = StatusSummary {
            generated_at: chrono::Utc::now(),
            filtered_state: "OPEN".to_string(),
            total_tasks: 2,
            open_tasks: 2,
            resolved_tasks: 0,
            tasks: vec![],
            tasks_by_type: Default::default(),
            tasks_by_issue: Default::default(),
            tasks_by_integration: Default::default(),
            configs: vec![tctl_discovery_types::ConfigStatusRow {
                name: "cfg-1".to_string(),
                group: "default".to_string(),
                state: "DISCOVERY_CONFIG_STATE_SYNCING".to_string(),
                discovered_resource_count: 10,
                last_sync: None,
            }],
            integration_resource_stats: {
                let mut m = std::collections::BTreeMap::new();
                m.insert(
                    String::new(),
                    tctl_discovery_types::IntegrationResourceSummary {
                        found: 5,
                        enrolled: 2,
                        failed: 1,
                    },
                );
                m
            },
        };
        let rendered = render_status(&summary, &colors(), &[]);
        let user_tasks_pos = rendered.find("User Tasks [").unwrap();
        let configs_pos = rendered.find("Discovery Configs [").unwrap();
        let integration_pos = rendered.find("Integration Resource Status [").unwrap();
        assert!(user_tasks_pos < configs_pos);
        assert!(configs_pos < integration_pos);
        assert!(rendered.contains("Syncing"));
        assert!(rendered.contains("none (ambient credentials)"));
        assert!(rendered.contains("Awaiting Join"));
    }
}
