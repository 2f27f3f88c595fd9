//! C4 — SSM Event Pipeline (§4.4).

use tctl_discovery_backend::{Event, SsmRunEvent};
use tctl_discovery_types::{
    SsmAnalysis, SsmEventFilter, SsmRunHistoryRow, SsmRunRecord, SsmVmGroup, UNKNOWN_INSTANCE,
};

use crate::time::parse_timestamp;

/// Parses one `SSMRun` event into a record, applying `filter`. Returns
/// `None` for non-`SsmRun` events and events the filter drops (§4.4).
pub fn parse_event(event: &Event, filter: &SsmEventFilter) -> Option<SsmRunRecord> {
    let Event::SsmRun(ev) = event else {
        return None;
    };
    let record = build_record(ev);

    if !filter.instance_id.is_empty()
        && !record
            .instance_id
            .trim()
            .eq_ignore_ascii_case(filter.instance_id.trim())
    {
        return None;
    }
    if filter.failed_only && !record.is_failure() {
        return None;
    }
    Some(record)
}

fn build_record(ev: &SsmRunEvent) -> SsmRunRecord {
    let event_time = if ev.time.trim().is_empty() {
        None
    } else {
        parse_timestamp(&ev.time)
    };
    SsmRunRecord {
        event_time_raw: ev.time.clone(),
        event_time,
        code: ev.code.clone(),
        instance_id: ev.instance_id.clone(),
        status: ev.status.clone(),
        exit_code: ev.exit_code,
        account_id: ev.account_id.clone(),
        region: ev.region.clone(),
        command_id: ev.command_id.clone(),
        invocation_url: ev.invocation_url.clone(),
        stderr: ev.standard_error.clone(),
    }
}

/// Parses every event in `events`, applying `filter` to each (§4.4).
pub fn parse_events(events: &[Event], filter: &SsmEventFilter) -> Vec<SsmRunRecord> {
    events.iter().filter_map(|e| parse_event(e, filter)).collect()
}

/// Descending by parsed event-time (unparseable/`None` sorts last), then
/// descending lexicographic on the raw time string for deterministic
/// tie-breaks (§4.4).
pub fn sort_records_desc(records: &mut [SsmRunRecord]) {
    records.sort_by(|a, b| match (a.event_time, b.event_time) {
        (Some(at), Some(bt)) => bt
            .cmp(&at)
            .then_with(|| b.event_time_raw.cmp(&a.event_time_raw)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.event_time_raw.cmp(&a.event_time_raw),
    });
}

/// Buckets `records` by instance-id (blank ⇒ `"unknown"`), each bucket
/// sorted descending with `most_recent = runs[0]`. Groups themselves are
/// sorted descending by most-recent time, then ascending by instance-id
/// (§4.4).
pub fn group_by_instance(mut records: Vec<SsmRunRecord>) -> Vec<SsmVmGroup> {
    sort_records_desc(&mut records);

    let mut buckets: Vec<(String, Vec<SsmRunRecord>)> = Vec::new();
    for record in records {
        let key = if record.instance_id.trim().is_empty() {
            UNKNOWN_INSTANCE.to_string()
        } else {
            record.instance_id.clone()
        };
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, runs)) => runs.push(record),
            None => buckets.push((key, vec![record])),
        }
    }

    let mut groups: Vec<SsmVmGroup> = buckets
        .into_iter()
        .map(|(instance_id, runs)| {
            let most_recent = runs[0].clone();
            let most_recent_failed = most_recent.is_failure();
            let failed = runs.iter().filter(|r| r.is_failure()).count();
            let total = runs.len();
            SsmVmGroup {
                instance_id,
                most_recent,
                most_recent_failed,
                total,
                failed,
                success: total - failed,
                runs,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        match (a.most_recent.event_time, b.most_recent.event_time) {
            (Some(at), Some(bt)) => bt.cmp(&at).then_with(|| a.instance_id.cmp(&b.instance_id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.instance_id.cmp(&b.instance_id),
        }
    });
    groups
}

/// Total/success/failed counts plus `byInstance`/`failedByInstance`
/// histograms over the full (ungrouped) record set (§4.4).
pub fn analyze(records: &[SsmRunRecord]) -> SsmAnalysis {
    let mut analysis = SsmAnalysis {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        let key = if record.instance_id.trim().is_empty() {
            UNKNOWN_INSTANCE.to_string()
        } else {
            record.instance_id.clone()
        };
        *analysis.by_instance.entry(key.clone()).or_insert(0) += 1;
        if record.is_failure() {
            analysis.failed += 1;
            *analysis.failed_by_instance.entry(key).or_insert(0) += 1;
        } else {
            analysis.success += 1;
        }
    }
    analysis
}

/// Groups whose most-recent run failed, newest-first (already the
/// group order), optionally capped at `limit` (`0` = unlimited) (§4.4).
pub fn select_failing_vm_groups(groups: &[SsmVmGroup], limit: usize) -> Vec<SsmVmGroup> {
    let failing: Vec<SsmVmGroup> = groups
        .iter()
        .filter(|g| g.most_recent_failed)
        .cloned()
        .collect();
    if limit == 0 || failing.len() <= limit {
        failing
    } else {
        failing.into_iter().take(limit).collect()
    }
}

/// Default mode (`show_all = false`) returns only the most recent run;
/// `show_all = true` returns the full history (§4.4).
pub fn build_vm_history_rows(group: &SsmVmGroup, show_all: bool) -> Vec<SsmRunHistoryRow> {
    let runs = if show_all {
        &group.runs[..]
    } else {
        &group.runs[..1.min(group.runs.len())]
    };
    runs.iter().map(history_row).collect()
}

fn history_row(record: &SsmRunRecord) -> SsmRunHistoryRow {
    let display_time = match record.event_time {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => record.event_time_raw.clone(),
    };
    SsmRunHistoryRow {
        display_time,
        result: record.result_text().to_string(),
        command_id: record.command_id.clone(),
        exit_code: record.exit_code,
    }
}
