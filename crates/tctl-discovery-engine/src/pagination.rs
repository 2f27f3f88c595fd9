//! C2 — Pagination Kernel (§4.2).

use tctl_discovery_types::PageInfo;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Clamps `page >= 1`, `page_size >= 1` (default 25).
pub fn normalize(page: usize, page_size: usize) -> (usize, usize) {
    let page = if page == 0 { 1 } else { page };
    let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
    (page, page_size)
}

/// Slices `items` to the requested page and returns the matching
/// `PageInfo`. Out-of-range pages yield an empty slice with a non-zero
/// `total` (§4.2, §8 boundary behaviors).
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], PageInfo) {
    let (page, page_size) = normalize(page, page_size);
    let total = items.len();
    let start = ((page - 1) * page_size).min(total);
    let end = (start + page_size).min(total);
    let info = PageInfo {
        page,
        page_size,
        total,
        start,
        end,
        remaining: total - end,
        has_next: end < total,
        next_page: page + 1,
    };
    (&items[start..end], info)
}

/// `PageInfo` for a single-object view with `n` sub-items, all shown on
/// one page (§4.2).
pub fn full_page_info(n: usize) -> PageInfo {
    PageInfo {
        page: 1,
        page_size: n,
        total: n,
        start: 0,
        end: n,
        remaining: 0,
        has_next: false,
        next_page: 2,
    }
}

/// Removes any existing `--page=…` token from `cmd` and appends
/// `--page=<page>`, preserving other flags and normalizing whitespace
/// between tokens. Idempotent: applying it twice with different pages
/// never leaves two `--page=` tokens (§4.2, §8 invariant 5).
pub fn with_page_flag(cmd: &str, page: usize) -> String {
    let mut tokens: Vec<&str> = cmd
        .split_whitespace()
        .filter(|tok| !tok.starts_with("--page="))
        .collect();
    let flag = format!("--page={page}");
    tokens.push(&flag);
    tokens.join(" ")
}
