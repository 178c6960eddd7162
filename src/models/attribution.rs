//! Attribution record and the open-permalink command payload.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::Url;

/// One line's version-control provenance.
///
/// Constructed once per successful blame query and immutable afterward. A
/// failed or irrelevant query yields no record at all, never a zeroed one,
/// so callers can tell "unknown" from "nothing here".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionRecord {
    /// Full hexadecimal revision identifier, always present and non-empty.
    pub commit_id: String,
    /// Author display name.
    pub author: Option<String>,
    /// Author timestamp, unix seconds.
    pub authored_at: Option<i64>,
    /// First line of the commit message.
    pub summary: Option<String>,
}

/// Payload round-tripped through the `executeCommand` arguments when the
/// user picks the attribution code action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermalinkRequest {
    pub uri: Url,
    /// One-based line number.
    pub line: u32,
}
