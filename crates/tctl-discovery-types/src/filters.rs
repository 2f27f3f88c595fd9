/// User-supplied filter inputs for `tasks ls` / `status` (§4.3).
///
/// Fields left empty mean "no filter on this dimension" except `state`,
/// whose empty-string encoding of "no filter" is produced by
/// `tctl_discovery_engine::task::normalize_task_state` (callers should
/// not construct that encoding by hand).
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub state: String,
    pub integration: String,
    pub task_type: String,
    pub issue_type: String,
}

/// User-supplied filter inputs for `ssm-runs ls` / `ssm-runs show` (§4.4).
#[derive(Debug, Clone, Default)]
pub struct SsmEventFilter {
    pub instance_id: String,
    pub failed_only: bool,
}
