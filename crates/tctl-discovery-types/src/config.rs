use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{found, enrolled, failed}` resource counts for one integration within
/// one cloud family, or summed across families (§3, §4.5).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IntegrationResourceSummary {
    pub found: u64,
    pub enrolled: u64,
    pub failed: u64,
}

impl IntegrationResourceSummary {
    /// Resources neither enrolled nor failed — still in flight.
    /// Never negative: `max(0, found - enrolled - failed)`.
    pub fn awaiting_join(&self) -> u64 {
        self.found.saturating_sub(self.enrolled).saturating_sub(self.failed)
    }

    pub fn add(&mut self, other: &IntegrationResourceSummary) {
        self.found += other.found;
        self.enrolled += other.enrolled;
        self.failed += other.failed;
    }
}

/// Matcher counts per cloud family configured on a `DiscoveryConfig`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MatcherCounts {
    pub aws_ec2: u64,
    pub aws_eks: u64,
    pub aws_rds: u64,
    pub azure_vm: u64,
}

/// Per-integration resource summaries, broken out by cloud family. Keys
/// are integration names; an empty-string key represents ambient
/// credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfigStatus {
    pub aws_ec2: BTreeMap<String, IntegrationResourceSummary>,
    pub aws_eks: BTreeMap<String, IntegrationResourceSummary>,
    pub aws_rds: BTreeMap<String, IntegrationResourceSummary>,
    pub azure_vms: BTreeMap<String, IntegrationResourceSummary>,
}

impl DiscoveryConfigStatus {
    /// Iterate the four cloud-family maps in a fixed order, so callers
    /// that fold across families get deterministic results without
    /// depending on struct field order.
    pub fn families(&self) -> [&BTreeMap<String, IntegrationResourceSummary>; 4] {
        [&self.aws_ec2, &self.aws_eks, &self.aws_rds, &self.azure_vms]
    }
}

/// A matcher set that produces discovered resources (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub name: String,
    pub group: String,
    /// Raw state string, possibly namespaced (e.g.
    /// `DISCOVERY_CONFIG_STATE_SYNCING`), possibly blank.
    #[serde(default)]
    pub state: String,
    pub matchers: MatcherCounts,
    pub discovered_resource_count: u64,
    pub last_sync: Option<DateTime<Utc>>,
    pub status: DiscoveryConfigStatus,
}
