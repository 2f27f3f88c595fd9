use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable event codes for SSM-run success / failure (§6, GLOSSARY).
pub const CODE_SUCCESS: &str = "TDS00I";
pub const CODE_FAILURE: &str = "TDS00W";

/// One parsed SSM audit event (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsmRunRecord {
    /// Raw textual event time, kept even when unparseable so display can
    /// fall back to it.
    pub event_time_raw: String,
    pub event_time: Option<DateTime<Utc>>,
    pub code: String,
    pub instance_id: String,
    pub status: String,
    pub exit_code: i64,
    pub account_id: String,
    pub region: String,
    pub command_id: String,
    pub invocation_url: String,
    pub stderr: String,
}

impl SsmRunRecord {
    /// A record is a failure iff `code == TDS00W` (case-insensitive) OR
    /// `status` is non-empty and not `Success` (case-insensitive) (§3).
    pub fn is_failure(&self) -> bool {
        if self.code.eq_ignore_ascii_case(CODE_FAILURE) {
            return true;
        }
        !self.status.is_empty() && !self.status.eq_ignore_ascii_case("success")
    }

    pub fn exit_code_text(&self) -> String {
        self.exit_code.to_string()
    }

    /// The "result" column used by per-VM history rows: the status
    /// string if set, else the raw code (§4.4).
    pub fn result_text(&self) -> &str {
        if self.status.is_empty() {
            &self.code
        } else {
            &self.status
        }
    }
}

/// All records for a single instance-id, ordered newest-first (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsmVmGroup {
    /// `"unknown"` when the instance-id was blank.
    pub instance_id: String,
    pub most_recent: SsmRunRecord,
    pub most_recent_failed: bool,
    pub total: usize,
    pub failed: usize,
    pub success: usize,
    pub runs: Vec<SsmRunRecord>,
}

/// Display-sentinel used for a blank instance-id (§4.4 grouping rule).
pub const UNKNOWN_INSTANCE: &str = "unknown";

/// Global counts plus per-instance histograms over a parsed record set
/// (§4.4 "global analysis").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsmAnalysis {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub by_instance: BTreeMap<String, usize>,
    pub failed_by_instance: BTreeMap<String, usize>,
}

/// One row in a per-VM run-history listing (§4.4 "per-VM history rows").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsmRunHistoryRow {
    /// `YYYY-MM-DD HH:MM:SS` from the parsed time, falling back to the
    /// raw event-time string when unparseable.
    pub display_time: String,
    pub result: String,
    pub command_id: String,
    pub exit_code: i64,
}
