//! `discovery tasks ls|show` (§4.9 bullets 2-3).

use tctl_discovery_backend::{CancelScope, UserTasksClient};
use tctl_discovery_engine::next_action::{task_detail_actions, task_list_actions};
use tctl_discovery_engine::pagination::paginate;
use tctl_discovery_engine::task::{
    find_task_by_name_prefix, normalize_task_state, project_task, sort_task_list_items,
    sort_tasks, task_matches_filter,
};
use tctl_discovery_engine::time::shorten_name;
use tctl_discovery_types::{
    AzureVmResource, Ec2Instance, EksCluster, RdsDatabase, Result, TaskFilter, TaskListItem,
    TaskPayload, TASK_TYPE_EC2,
};

use crate::args::{LogLevel, TasksLsArgs, TasksShowArgs};
use crate::clients::list_all_user_tasks;
use crate::color::Colorizer;
use crate::output::TaskDetailOutput;
use crate::router::route;
use crate::text::{
    render_azure_vm_resources, render_ec2_instances, render_eks_clusters, render_rds_databases,
    render_task_detail, render_task_list,
};

pub fn handle_ls(
    args: &TasksLsArgs,
    client: &dyn UserTasksClient,
    scope: &CancelScope,
    colors: &Colorizer,
    log_level: LogLevel,
) -> Result<String> {
    let state = normalize_task_state(&args.state)?;

    // State is passed server-side (blank means "all"); every dimension
    // is still re-applied in-memory per §4.9 bullet 2.
    let fetched = list_all_user_tasks(client, scope, &args.integration, &state, log_level)?;

    let filter = TaskFilter {
        state,
        integration: args.integration.clone(),
        task_type: args.task_type.clone(),
        issue_type: args.issue_type.clone(),
    };

    let mut tasks: Vec<_> = fetched
        .into_iter()
        .filter(|t| task_matches_filter(t, &filter))
        .collect();
    sort_tasks(&mut tasks);

    let mut items: Vec<TaskListItem> = tasks.iter().map(project_task).collect();
    sort_task_list_items(&mut items);

    let actions = task_list_actions(&items, &filter);

    route(args.format, &items, Some(|items: &Vec<TaskListItem>| {
        render_task_list(items, colors, &actions)
    }))
}

/// Renders whichever of the four typed resource blocks matches the
/// task's payload, paginated by `page`/`page_size`, returning the
/// rendered text block, its `PageInfo`, and (EC2 only) the full sorted
/// set of instance ids for the next-action engine (§4.7, §4.8).
fn render_resources(
    payload: &TaskPayload,
    page: usize,
    page_size: usize,
) -> (String, tctl_discovery_types::PageInfo, Vec<String>) {
    match payload {
        TaskPayload::Ec2 { instances } => {
            let mut entries: Vec<(&String, &Ec2Instance)> = instances.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let (slice, info) = paginate(&entries, page, page_size);
            let ids = entries.iter().map(|(id, _)| (*id).clone()).collect();
            (render_ec2_instances(slice), info, ids)
        }
        TaskPayload::Eks { clusters } => {
            let mut entries: Vec<(&String, &EksCluster)> = clusters.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let (slice, info) = paginate(&entries, page, page_size);
            (render_eks_clusters(slice), info, Vec::new())
        }
        TaskPayload::Rds { databases } => {
            let mut entries: Vec<(&String, &RdsDatabase)> = databases.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let (slice, info) = paginate(&entries, page, page_size);
            (render_rds_databases(slice), info, Vec::new())
        }
        TaskPayload::AzureVm { vms } => {
            let mut entries: Vec<(&String, &AzureVmResource)> = vms.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let (slice, info) = paginate(&entries, page, page_size);
            (render_azure_vm_resources(slice), info, Vec::new())
        }
        TaskPayload::Unknown => {
            let empty: Vec<()> = Vec::new();
            let (_, info) = paginate(&empty, page, page_size);
            (String::new(), info, Vec::new())
        }
    }
}

pub fn handle_show(
    args: &TasksShowArgs,
    client: &dyn UserTasksClient,
    scope: &CancelScope,
    colors: &Colorizer,
    log_level: LogLevel,
) -> Result<String> {
    let all_tasks = list_all_user_tasks(client, scope, "", "", log_level)?;
    let task = find_task_by_name_prefix(&all_tasks, &args.name)?.clone();

    let (resources_block, page_info, ec2_instance_ids) =
        render_resources(&task.payload, args.page, args.page_size);

    let prefix = shorten_name(&task.name);
    let show_cmd = format!(
        "tctl discovery tasks show {prefix} --page-size={} --page={}",
        page_info.page_size, page_info.page
    );

    let ec2_ids = if task.task_type == TASK_TYPE_EC2 {
        ec2_instance_ids
    } else {
        Vec::new()
    };
    let actions = task_detail_actions(&task.integration, &task.task_type, &ec2_ids, &page_info, &show_cmd);

    let output = TaskDetailOutput {
        task: &task,
        page_info,
    };
    route(args.format, &output, Some(|_: &TaskDetailOutput| {
        render_task_detail(&task, &resources_block, &page_info, colors, &actions)
    }))
}
