//! `discovery ssm-runs ls|show` (§4.9 bullets 4-5).

use tctl_discovery_backend::{CancelScope, EventsClient};
use tctl_discovery_engine::next_action::{ssm_list_actions, ssm_show_actions};
use tctl_discovery_engine::pagination::paginate;
use tctl_discovery_engine::ssm::{analyze, group_by_instance, parse_events, select_failing_vm_groups};
use tctl_discovery_engine::time::parse_since_duration;
use tctl_discovery_types::{Result, SsmEventFilter, SsmVmGroup, UNKNOWN_INSTANCE};

use crate::args::{LogLevel, SsmRunsLsArgs, SsmRunsShowArgs};
use crate::clients::fetch_ssm_events;
use crate::color::Colorizer;
use crate::output::{SsmRunsListOutput, SsmRunsShowOutput};
use crate::router::route;
use crate::text::{render_ssm_runs_list, render_ssm_runs_show};

pub fn handle_ls(
    args: &SsmRunsLsArgs,
    client: &dyn EventsClient,
    scope: &CancelScope,
    colors: &Colorizer,
    log_level: LogLevel,
) -> Result<String> {
    let since = parse_since_duration(&args.since)?;
    let events = fetch_ssm_events(client, scope, since, args.limit, log_level)?;

    let filter = SsmEventFilter {
        instance_id: String::new(),
        failed_only: args.failed,
    };
    let records = parse_events(&events, &filter);
    let analysis = analyze(&records);
    let groups = group_by_instance(records);

    // §9 open question 2: `limit=0` (unlimited) here; pagination applies
    // afterward on the full failing-VM list.
    let failing = select_failing_vm_groups(&groups, 0);
    let (page_slice, page_info) = paginate(&failing, args.page, args.page_size);

    let actions = ssm_list_actions(page_slice, &args.since);

    let output = SsmRunsListOutput {
        since: &args.since,
        analysis: analysis.clone(),
        failing_vms: page_slice,
        page_info,
    };

    route(args.format, &output, Some(|_: &SsmRunsListOutput| {
        render_ssm_runs_list(
            &args.since,
            &analysis,
            page_slice,
            &page_info,
            args.show_all_runs,
            colors,
            &actions,
        )
    }))
}

pub fn handle_show(
    args: &SsmRunsShowArgs,
    client: &dyn EventsClient,
    scope: &CancelScope,
    colors: &Colorizer,
    log_level: LogLevel,
) -> Result<String> {
    let since = parse_since_duration(&args.since)?;
    let events = fetch_ssm_events(client, scope, since, args.limit, log_level)?;

    let filter = SsmEventFilter {
        instance_id: args.instance_id.clone(),
        failed_only: args.failed,
    };
    let records = parse_events(&events, &filter);
    let groups = group_by_instance(records);

    let needle = args.instance_id.trim();
    let group: Option<SsmVmGroup> = groups.into_iter().find(|g| {
        if needle.is_empty() {
            g.instance_id == UNKNOWN_INSTANCE
        } else {
            g.instance_id.eq_ignore_ascii_case(needle)
        }
    });

    let actions = ssm_show_actions(&args.instance_id, args.show_all_runs);

    let output = SsmRunsShowOutput {
        instance_id: &args.instance_id,
        vm: group.as_ref(),
    };

    route(args.format, &output, Some(|_: &SsmRunsShowOutput| {
        render_ssm_runs_show(
            &args.instance_id,
            group.as_ref(),
            args.show_all_runs,
            colors,
            &actions,
        )
    }))
}
