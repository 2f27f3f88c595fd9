use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open vs resolved — the two states a `UserTask` can be in (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    Open,
    Resolved,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Open => "OPEN",
            TaskState::Resolved => "RESOLVED",
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One affected resource discovered for an EC2 task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ec2Instance {
    pub instance_id: String,
    pub region: String,
    pub account_id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// One affected resource discovered for an EKS task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EksCluster {
    pub name: String,
    pub region: String,
    pub account_id: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// One affected resource discovered for an RDS task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdsDatabase {
    pub name: String,
    pub engine: String,
    pub region: String,
    pub account_id: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// One affected resource discovered for an Azure VM task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureVmResource {
    pub name: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub region: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Typed payload carrying a task's affected resources, keyed by a
/// string id. Unknown task-types carry no resources (§3 invariant).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TaskPayload {
    Ec2 {
        instances: BTreeMap<String, Ec2Instance>,
    },
    Eks {
        clusters: BTreeMap<String, EksCluster>,
    },
    Rds {
        databases: BTreeMap<String, RdsDatabase>,
    },
    AzureVm {
        vms: BTreeMap<String, AzureVmResource>,
    },
    Unknown,
}

impl TaskPayload {
    /// Affected-resource count, derived purely from the payload shape.
    /// Does not consult `task_type` — callers match both per §4.3.
    pub fn len(&self) -> usize {
        match self {
            TaskPayload::Ec2 { instances } => instances.len(),
            TaskPayload::Eks { clusters } => clusters.len(),
            TaskPayload::Rds { databases } => databases.len(),
            TaskPayload::AzureVm { vms } => vms.len(),
            TaskPayload::Unknown => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The well-known task-type identifiers. Any other non-empty string is
/// passed through as-is by `friendly_task_type` (§4.3).
pub const TASK_TYPE_EC2: &str = "discover-ec2";
pub const TASK_TYPE_EKS: &str = "discover-eks";
pub const TASK_TYPE_RDS: &str = "discover-rds";
pub const TASK_TYPE_AZURE_VM: &str = "discover-azure-vm";

/// An open or resolved discovery issue for one task-type (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTask {
    pub name: String,
    pub state: TaskState,
    pub task_type: String,
    pub issue_type: String,
    /// Empty string means "ambient credentials".
    #[serde(default)]
    pub integration: String,
    pub last_state_change: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    pub payload: TaskPayload,
}

impl UserTask {
    /// Affected-resource count for this task, derived purely from its
    /// payload for its declared task-type; unknown task-type ⇒ zero.
    pub fn affected_count(&self) -> usize {
        let matches_declared_type = matches!(
            (self.task_type.as_str(), &self.payload),
            (TASK_TYPE_EC2, TaskPayload::Ec2 { .. })
                | (TASK_TYPE_EKS, TaskPayload::Eks { .. })
                | (TASK_TYPE_RDS, TaskPayload::Rds { .. })
                | (TASK_TYPE_AZURE_VM, TaskPayload::AzureVm { .. })
        );
        if matches_declared_type {
            self.payload.len()
        } else {
            0
        }
    }
}
