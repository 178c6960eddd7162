//! Attribution label rendering.
//!
//! Pure functions from an attribution record (plus an explicit "now") to a
//! fixed-shape, length-bounded display string with relative-time phrasing.

use crate::models::AttributionRecord;

/// Summaries longer than this are truncated.
const SUMMARY_CHECK_CHARS: usize = 60;
/// Prefix kept when truncating; intentionally longer than the check
/// threshold.
const SUMMARY_PREFIX_CHARS: usize = 80;

/// Render `record` as `"<author>, <when> • <summary>"`. Missing pieces get
/// fixed placeholders; a missing summary is omitted along with its
/// separator.
pub fn format_label(record: &AttributionRecord, now: i64) -> String {
    let author = record.author.as_deref().unwrap_or("Unknown author");
    let when = match record.authored_at {
        Some(ts) => format_relative_time(now - ts),
        None => "unknown date".to_string(),
    };
    match record.summary.as_deref() {
        Some(summary) => format!("{author}, {when} • {}", truncate_summary(summary)),
        None => format!("{author}, {when}"),
    }
}

fn truncate_summary(summary: &str) -> String {
    if summary.chars().count() > SUMMARY_CHECK_CHARS {
        let prefix: String = summary.chars().take(SUMMARY_PREFIX_CHARS).collect();
        format!("{prefix}…")
    } else {
        summary.to_string()
    }
}

/// Bucket elapsed seconds into a relative phrase. The plural `s` appears
/// whenever the count exceeds 1; negative elapsed time clamps to "just now".
pub fn format_relative_time(elapsed_secs: i64) -> String {
    let secs = elapsed_secs.max(0);
    if secs < 10 {
        "just now".to_string()
    } else if secs < 60 {
        unit_ago(secs, "sec")
    } else if secs < 3600 {
        unit_ago(secs / 60, "min")
    } else if secs < 86400 {
        unit_ago(secs / 3600, "hour")
    } else if secs < 2_592_000 {
        unit_ago(secs / 86400, "day")
    } else if secs < 31_536_000 {
        unit_ago(secs / 2_592_000, "month")
    } else {
        unit_ago(secs / 31_536_000, "year")
    }
}

fn unit_ago(count: i64, unit: &str) -> String {
    format!("{} {}{} ago", count, unit, if count > 1 { "s" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::{format_label, format_relative_time};
    use crate::models::AttributionRecord;

    fn record(
        author: Option<&str>,
        authored_at: Option<i64>,
        summary: Option<&str>,
    ) -> AttributionRecord {
        AttributionRecord {
            commit_id: "abc123".to_string(),
            author: author.map(str::to_string),
            authored_at,
            summary: summary.map(str::to_string),
        }
    }

    #[test]
    fn relative_time_bucket_boundaries() {
        assert_eq!(format_relative_time(9), "just now");
        assert_eq!(format_relative_time(10), "10 secs ago");
        assert_eq!(format_relative_time(59), "59 secs ago");
        assert_eq!(format_relative_time(60), "1 min ago");
        assert_eq!(format_relative_time(3599), "59 mins ago");
        assert_eq!(format_relative_time(3600), "1 hour ago");
        assert_eq!(format_relative_time(86400), "1 day ago");
        assert_eq!(format_relative_time(2_592_000), "1 month ago");
        assert_eq!(format_relative_time(31_536_000), "1 year ago");
        assert_eq!(format_relative_time(2 * 31_536_000), "2 years ago");
    }

    #[test]
    fn negative_elapsed_clamps_to_just_now() {
        assert_eq!(format_relative_time(-30), "just now");
    }

    #[test]
    fn label_is_deterministic_for_a_fixed_now() {
        let rec = record(Some("Jane"), Some(1000), Some("Fix parser"));
        let a = format_label(&rec, 1060);
        let b = format_label(&rec, 1060);
        assert_eq!(a, b);
        assert_eq!(a, "Jane, 1 min ago • Fix parser");
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let rec = record(None, None, Some("S"));
        assert_eq!(format_label(&rec, 0), "Unknown author, unknown date • S");

        let rec = record(Some("Jane"), Some(0), None);
        assert_eq!(format_label(&rec, 5), "Jane, just now");
    }

    #[test]
    fn summary_of_sixty_chars_is_kept_whole() {
        let summary = "s".repeat(60);
        let rec = record(Some("A"), Some(0), Some(&summary));
        let label = format_label(&rec, 0);
        assert!(label.ends_with(&summary));
        assert!(!label.contains('…'));
    }

    #[test]
    fn summary_of_sixty_one_chars_is_truncated() {
        let summary = "s".repeat(61);
        let rec = record(Some("A"), Some(0), Some(&summary));
        let label = format_label(&rec, 0);
        assert!(label.ends_with('…'));
        // The slice is longer than the check threshold, so a 61-char summary
        // survives in full ahead of the ellipsis.
        assert!(label.contains(&summary));
    }

    #[test]
    fn long_summary_is_cut_to_the_prefix_length() {
        let summary = "x".repeat(200);
        let rec = record(Some("A"), Some(0), Some(&summary));
        let label = format_label(&rec, 0);
        assert!(label.ends_with(&format!("{}…", "x".repeat(80))));
        assert!(!label.contains(&"x".repeat(81)));
    }
}
