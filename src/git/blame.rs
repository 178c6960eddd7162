//! Porcelain blame parsing.
//!
//! Turns the raw output of a single-line `git blame --porcelain` query into
//! an [`AttributionRecord`]. The format is semi-structured: the first line
//! carries the commit id as its first token, the remaining lines are
//! space-separated `key value...` pairs in no particular order. Malformed or
//! empty input yields no record, never a partial one.

use crate::models::AttributionRecord;

/// Parse one single-line blame query's output.
///
/// Recognized keys: `author`, `author-time` (integer seconds, non-numeric
/// values ignored) and `summary`. Duplicate keys keep the last valid
/// occurrence; unrecognized keys are skipped.
pub fn parse_porcelain(raw: &str) -> Option<AttributionRecord> {
    let mut lines = raw.lines();
    let commit_id = lines.next()?.split_whitespace().next()?;
    if !commit_id.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let mut author = None;
    let mut authored_at = None;
    let mut summary = None;

    for line in lines {
        let Some((key, value)) = line.split_once(' ') else {
            continue;
        };
        match key {
            "author" => author = Some(value.to_string()),
            "author-time" => {
                if let Ok(secs) = value.trim().parse::<i64>() {
                    authored_at = Some(secs);
                }
            }
            "summary" => summary = Some(value.to_string()),
            _ => {}
        }
    }

    Some(AttributionRecord {
        commit_id: commit_id.to_string(),
        author,
        authored_at,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_porcelain;

    const WELL_FORMED: &str = "\
4f0c2b9d8e1a7f3c5b6d0e9a8c7b6a5d4e3f2c1b 1 1 1
author Jane Doe
author-mail <jane@example.com>
author-time 1714000000
author-tz +0200
summary Fix off-by-one in parser
filename src/parser.rs
\tlet x = 1;
";

    #[test]
    fn well_formed_output_yields_full_record() {
        let record = parse_porcelain(WELL_FORMED).expect("record");
        assert_eq!(
            record.commit_id,
            "4f0c2b9d8e1a7f3c5b6d0e9a8c7b6a5d4e3f2c1b"
        );
        assert_eq!(record.author.as_deref(), Some("Jane Doe"));
        assert_eq!(record.authored_at, Some(1_714_000_000));
        assert_eq!(record.summary.as_deref(), Some("Fix off-by-one in parser"));
    }

    #[test]
    fn key_order_does_not_matter() {
        let raw = "abc123 1 1 1\nsummary S\nauthor-time 42\nauthor X\n";
        let record = parse_porcelain(raw).expect("record");
        assert_eq!(record.author.as_deref(), Some("X"));
        assert_eq!(record.authored_at, Some(42));
        assert_eq!(record.summary.as_deref(), Some("S"));
    }

    #[test]
    fn duplicate_keys_keep_last_occurrence() {
        let raw = "abc123 1 1 1\nauthor First\nauthor Second\n";
        let record = parse_porcelain(raw).expect("record");
        assert_eq!(record.author.as_deref(), Some("Second"));
    }

    #[test]
    fn non_numeric_author_time_is_ignored() {
        let raw = "abc123 1 1 1\nauthor-time 100\nauthor-time soon\n";
        let record = parse_porcelain(raw).expect("record");
        assert_eq!(record.authored_at, Some(100));
    }

    #[test]
    fn empty_and_whitespace_input_yield_no_record() {
        assert!(parse_porcelain("").is_none());
        assert!(parse_porcelain("   \n\t\n").is_none());
    }

    #[test]
    fn non_hex_commit_token_yields_no_record() {
        assert!(parse_porcelain("fatal: no such path\n").is_none());
    }

    #[test]
    fn missing_fields_stay_absent() {
        let record = parse_porcelain("abc123 1 1 1\n").expect("record");
        assert!(record.author.is_none());
        assert!(record.authored_at.is_none());
        assert!(record.summary.is_none());
    }

    #[test]
    fn author_mail_is_not_mistaken_for_author() {
        let raw = "abc123 1 1 1\nauthor-mail <jane@example.com>\n";
        let record = parse_porcelain(raw).expect("record");
        assert!(record.author.is_none());
    }
}
