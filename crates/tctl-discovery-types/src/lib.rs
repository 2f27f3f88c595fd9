//! Core data model for the discovery troubleshooting CLI.
//!
//! Small, dependency-light structs and enums shared by every other
//! crate in this subsystem, with no business logic beyond constructors
//! and plain derives.

pub mod config;
pub mod error;
pub mod filters;
pub mod pagination;
pub mod ssm;
pub mod status;
pub mod task;

pub use config::{DiscoveryConfig, DiscoveryConfigStatus, IntegrationResourceSummary, MatcherCounts};
pub use error::{DiscoveryError, Result};
pub use filters::{SsmEventFilter, TaskFilter};
pub use pagination::PageInfo;
pub use ssm::{
    SsmAnalysis, SsmRunHistoryRow, SsmRunRecord, SsmVmGroup, CODE_FAILURE, CODE_SUCCESS,
    UNKNOWN_INSTANCE,
};
pub use status::{ConfigStatusRow, StatusSummary, TaskListItem};
pub use task::{
    AzureVmResource, Ec2Instance, EksCluster, RdsDatabase, TaskPayload, TaskState, UserTask,
    TASK_TYPE_AZURE_VM, TASK_TYPE_EC2, TASK_TYPE_EKS, TASK_TYPE_RDS,
};
