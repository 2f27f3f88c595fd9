//! Typed outputs handed to the output router (C6, §4.6).
//!
//! `StatusSummary` and `TaskListItem` already implement `Serialize` in
//! `tctl-discovery-types` and are used as-is; the shapes below exist
//! only where a view needs to bundle several typed values (a task plus
//! its resource page, an SSM analysis plus its VM page) into one
//! JSON/YAML document.

use serde::Serialize;
use tctl_discovery_types::{PageInfo, SsmAnalysis, SsmVmGroup, UserTask};

#[derive(Debug, Serialize)]
pub struct TaskDetailOutput<'a> {
    pub task: &'a UserTask,
    pub page_info: PageInfo,
}

#[derive(Debug, Serialize)]
pub struct SsmRunsListOutput<'a> {
    pub since: &'a str,
    pub analysis: SsmAnalysis,
    pub failing_vms: &'a [SsmVmGroup],
    pub page_info: PageInfo,
}

#[derive(Debug, Serialize)]
pub struct SsmRunsShowOutput<'a> {
    pub instance_id: &'a str,
    pub vm: Option<&'a SsmVmGroup>,
}
