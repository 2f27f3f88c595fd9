//! C1 — Time/Format Utilities (§4.1).

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use tctl_discovery_types::{DiscoveryError, Result};

/// Layouts tried, in order, after RFC3339: `"2006-01-02 15:04:05[.fractional]"`
/// interpreted as UTC. `chrono::DateTime::parse_from_rfc3339` already
/// accepts both RFC3339 and RFC3339-with-nanoseconds, so only one extra
/// family of layouts is needed here.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parses a trimmed timestamp string, trying RFC3339(Nano) then a plain
/// `"YYYY-MM-DD HH:MM:SS[.fractional]"` layout interpreted as UTC.
/// Returns `None` for an empty or unparseable string.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Renders `target` relative to `now` (`Utc::now()` substituted when
/// `now` is `None`). `"never"` when `target` is `None`. In `detailed`
/// mode, a secondary unit is appended (e.g. `"2d 3h ago"`).
pub fn format_relative(
    target: Option<DateTime<Utc>>,
    now: Option<DateTime<Utc>>,
    detailed: bool,
) -> String {
    let Some(target) = target else {
        return "never".to_string();
    };
    let now = now.unwrap_or_else(Utc::now);
    let delta = target.signed_duration_since(now);
    let future = delta.num_milliseconds() >= 0;
    let abs = if future { delta } else { -delta };
    let suffix = if future { "from now" } else { "ago" };

    if abs < chrono::Duration::seconds(60) {
        let secs = abs.num_seconds().max(1);
        return format!("{secs}s {suffix}");
    }

    let days = abs.num_days();
    if days > 0 {
        let rem_hours = abs.num_hours() - days * 24;
        if detailed && rem_hours > 0 {
            return format!("{days}d {rem_hours}h {suffix}");
        }
        return format!("{days}d {suffix}");
    }

    let hours = abs.num_hours();
    if hours > 0 {
        let rem_minutes = abs.num_minutes() - hours * 60;
        if detailed && rem_minutes > 0 {
            return format!("{hours}h {rem_minutes}m {suffix}");
        }
        return format!("{hours}h {suffix}");
    }

    let minutes = abs.num_minutes().max(1);
    format!("{minutes}m {suffix}")
}

/// Renders an expiry time: `"never"` when unset, `"in Xh"` when in the
/// future, `"expired Xh ago"` otherwise (§4.1).
pub fn format_expiry(target: Option<DateTime<Utc>>, now: Option<DateTime<Utc>>) -> String {
    let Some(t) = target else {
        return "never".to_string();
    };
    let now = now.unwrap_or_else(Utc::now);
    let rel = format_relative(Some(t), Some(now), false);
    if t > now {
        let value = rel.trim_end_matches("from now").trim();
        format!("in {value}")
    } else {
        let value = rel.trim_end_matches("ago").trim();
        format!("expired {value} ago")
    }
}

/// Shortens a UUID (`8-4-4-4-12`, hex) to its first 8-char segment.
/// Otherwise returns the trimmed input with any `...`/`…` suffix
/// removed, unchanged.
pub fn shorten_name(name: &str) -> String {
    let trimmed = name.trim();
    if is_uuid_shape(trimmed) {
        return trimmed[..8].to_string();
    }
    trimmed.trim_end_matches("...").trim_end_matches('…').to_string()
}

fn is_uuid_shape(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    const EXPECTED_LENS: [usize; 5] = [8, 4, 4, 4, 12];
    parts.len() == 5
        && parts
            .iter()
            .zip(EXPECTED_LENS)
            .all(|(part, len)| part.len() == len && part.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Strips a small set of Markdown constructs down to plain text (§4.1):
/// `[text](url)` → `text: url`; backticks removed; a line that is
/// entirely `**text**` becomes `TEXT:`; inline `**text**` → `text`.
pub fn normalize_help_text(input: &str) -> String {
    input.lines().map(normalize_help_line).collect::<Vec<_>>().join("\n")
}

fn normalize_help_line(line: &str) -> String {
    let trimmed = line.trim();
    if is_bold_only_line(trimmed) {
        let inner = &trimmed[2..trimmed.len() - 2];
        return format!("{}:", inner.to_uppercase());
    }
    let replaced = replace_links(line);
    let replaced = replaced.replace('`', "");
    replace_inline_bold(&replaced)
}

fn is_bold_only_line(s: &str) -> bool {
    s.len() > 4 && s.starts_with("**") && s.ends_with("**")
}

fn replace_links(line: &str) -> String {
    let mut result = String::new();
    let mut cursor = 0;
    loop {
        match line[cursor..].find('[') {
            None => {
                result.push_str(&line[cursor..]);
                break;
            }
            Some(rel_start) => {
                let start = cursor + rel_start;
                result.push_str(&line[cursor..start]);
                let Some(rel_close) = line[start..].find(']') else {
                    result.push_str(&line[start..]);
                    break;
                };
                let close_bracket = start + rel_close;
                let is_link = line.as_bytes().get(close_bracket + 1) == Some(&b'(');
                let paren_close = is_link
                    .then(|| line[close_bracket + 2..].find(')'))
                    .flatten();
                match paren_close {
                    Some(rel_paren) => {
                        let close_paren = close_bracket + 2 + rel_paren;
                        let text = &line[start + 1..close_bracket];
                        let url = &line[close_bracket + 2..close_paren];
                        result.push_str(text);
                        result.push_str(": ");
                        result.push_str(url);
                        cursor = close_paren + 1;
                    }
                    None => {
                        result.push('[');
                        cursor = start + 1;
                    }
                }
            }
        }
    }
    result
}

fn replace_inline_bold(line: &str) -> String {
    let mut result = String::new();
    let mut cursor = 0;
    loop {
        match line[cursor..].find("**") {
            None => {
                result.push_str(&line[cursor..]);
                break;
            }
            Some(rel_start) => {
                let start = cursor + rel_start;
                result.push_str(&line[cursor..start]);
                let after = start + 2;
                match line[after..].find("**") {
                    Some(rel_end) => {
                        let end = after + rel_end;
                        result.push_str(&line[after..end]);
                        cursor = end + 2;
                    }
                    None => {
                        result.push_str(&line[start..]);
                        break;
                    }
                }
            }
        }
    }
    result
}

/// Humanizes a (possibly namespaced) enum string: strips a
/// `DISCOVERY_CONFIG_STATE_` prefix, lowercases, title-cases
/// underscore-delimited words. Empty ⇒ `"Unknown"` (§4.1).
pub fn humanize_enum(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "Unknown".to_string();
    }
    let stripped = trimmed
        .strip_prefix("DISCOVERY_CONFIG_STATE_")
        .unwrap_or(trimmed);
    stripped
        .to_lowercase()
        .split('_')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Parses a `--since` duration string (§4.9): one or more `<n><unit>`
/// segments (`d`, `h`, `m`, `s`), e.g. `"1h"`, `"2h30m"`, `"45s"`. Empty
/// input, an unparseable string, or a non-positive total are all a
/// `BadParameter`.
pub fn parse_since_duration(raw: &str) -> Result<Duration> {
    let trimmed = raw.trim();
    let invalid = || DiscoveryError::bad_parameter(format!("invalid --since value: {raw}"));

    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut total = Duration::zero();
    let mut chars = trimmed.chars().peekable();
    let mut saw_segment = false;

    while chars.peek().is_some() {
        let mut digits = String::new();
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit() || *c == '.') {
            digits.push(chars.next().unwrap());
        }
        if digits.is_empty() {
            return Err(invalid());
        }
        let unit = chars.next().ok_or_else(invalid)?;
        let value: f64 = digits.parse().map_err(|_| invalid())?;
        let segment = match unit {
            'd' => Duration::seconds((value * 86_400.0) as i64),
            'h' => Duration::seconds((value * 3_600.0) as i64),
            'm' => Duration::seconds((value * 60.0) as i64),
            's' => Duration::seconds(value as i64),
            _ => return Err(invalid()),
        };
        total = total + segment;
        saw_segment = true;
    }

    if !saw_segment || total <= Duration::zero() {
        return Err(invalid());
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: &str) -> DateTime<Utc> {
        Utc.datetime_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn parses_rfc3339_and_nano() {
        assert!(parse_timestamp("2024-01-02T03:04:05Z").is_some());
        assert!(parse_timestamp("2024-01-02T03:04:05.123456789Z").is_some());
    }

    #[test]
    fn parses_space_separated_layout() {
        assert!(parse_timestamp("2024-01-02 03:04:05").is_some());
        assert!(parse_timestamp("2024-01-02 03:04:05.5").is_some());
    }

    #[test]
    fn empty_string_is_not_ok() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
    }

    #[test]
    fn round_trips_through_rfc3339_nano() {
        let original = "2024-06-15T10:30:00.123456789Z";
        let parsed = parse_timestamp(original).unwrap();
        let rendered = parsed.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true);
        let reparsed = parse_timestamp(&rendered).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn never_for_none() {
        assert_eq!(format_relative(None, None, false), "never");
    }

    #[test]
    fn seconds_ago_minimum_one() {
        let now = ts("2024-01-01 00:00:10");
        let target = ts("2024-01-01 00:00:10");
        assert_eq!(format_relative(Some(target), Some(now), false), "1s ago");
    }

    #[test]
    fn days_ago_detailed() {
        let now = ts("2024-01-10 03:00:00");
        let target = ts("2024-01-08 00:00:00");
        assert_eq!(
            format_relative(Some(target), Some(now), true),
            "2d 3h ago"
        );
    }

    #[test]
    fn hours_from_now_detailed() {
        let now = ts("2024-01-01 00:00:00");
        let target = ts("2024-01-01 01:15:00");
        assert_eq!(
            format_relative(Some(target), Some(now), true),
            "1h 15m from now"
        );
    }

    #[test]
    fn expiry_future_and_past() {
        let now = ts("2024-01-01 00:00:00");
        let future = ts("2024-01-01 03:00:00");
        let past = ts("2023-12-31 21:00:00");
        assert_eq!(format_expiry(Some(future), Some(now)), "in 3h");
        assert_eq!(format_expiry(Some(past), Some(now)), "expired 3h ago");
        assert_eq!(format_expiry(None, Some(now)), "never");
    }

    #[test]
    fn shortens_uuid_to_first_segment() {
        assert_eq!(
            shorten_name("e785789e-1234-4abc-9def-0123456789ab"),
            "e785789e"
        );
    }

    #[test]
    fn non_uuid_name_returned_trimmed_without_truncation() {
        assert_eq!(shorten_name("my-task-name..."), "my-task-name");
        assert_eq!(shorten_name("  spaced  "), "spaced");
    }

    #[test]
    fn normalizes_markdown_link() {
        assert_eq!(
            normalize_help_text("See [the docs](https://example.com) for help"),
            "See the docs: https://example.com for help"
        );
    }

    #[test]
    fn normalizes_whole_line_bold_to_heading() {
        assert_eq!(normalize_help_text("**Fix it**"), "FIX IT:");
    }

    #[test]
    fn normalizes_inline_bold_and_backticks() {
        assert_eq!(
            normalize_help_text("Run `tctl` and **confirm** the fix"),
            "Run tctl and confirm the fix"
        );
    }

    #[test]
    fn humanizes_namespaced_enum() {
        assert_eq!(
            humanize_enum("DISCOVERY_CONFIG_STATE_SYNCING"),
            "Syncing"
        );
        assert_eq!(humanize_enum(""), "Unknown");
        assert_eq!(humanize_enum("RUNNING_OK"), "Running Ok");
    }

    #[test]
    fn parses_single_unit_since_values() {
        assert_eq!(parse_since_duration("1h").unwrap(), Duration::hours(1));
        assert_eq!(parse_since_duration("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_since_duration("45s").unwrap(), Duration::seconds(45));
        assert_eq!(parse_since_duration("2d").unwrap(), Duration::days(2));
    }

    #[test]
    fn parses_compound_since_values() {
        assert_eq!(
            parse_since_duration("2h30m").unwrap(),
            Duration::hours(2) + Duration::minutes(30)
        );
    }

    #[test]
    fn rejects_invalid_or_non_positive_since_values() {
        assert!(parse_since_duration("").is_err());
        assert!(parse_since_duration("bogus").is_err());
        assert!(parse_since_duration("0h").is_err());
        assert!(parse_since_duration("-1h").is_err());
        assert!(parse_since_duration("5").is_err());
    }
}
