use serde::{Deserialize, Serialize};

/// Page metadata for a sliced, ordered sequence (§3).
///
/// Invariants (enforced by `tctl_discovery_engine::pagination::paginate`,
/// not by this struct): `0 <= start <= end <= total`,
/// `remaining == total - end`, `has_next == (end < total)`,
/// `next_page == page + 1` (advisory even when `!has_next`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub start: usize,
    pub end: usize,
    pub remaining: usize,
    pub has_next: bool,
    pub next_page: usize,
}
