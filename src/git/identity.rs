//! Cache key derivation: repository identity plus a volatility token.
//!
//! The volatility token fingerprints "this file as of now" from the current
//! revision, the on-disk modification time and the byte size. False negatives
//! (recompute when nothing changed) are fine; a stale answer after a save is
//! not, which is why the cache is also cleared on save notifications rather
//! than trusting the token alone.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::git::invoker;

/// Opaque fingerprint of the current observable file state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolatilityToken(String);

impl VolatilityToken {
    /// Missing components are kept as a `-` placeholder so the token still
    /// distinguishes states by whatever parts are known.
    fn new(head: Option<&str>, mtime_ms: Option<u64>, size: Option<u64>) -> Self {
        let head = head.unwrap_or("-");
        let mtime = mtime_ms.map_or_else(|| "-".to_string(), |m| m.to_string());
        let size = size.map_or_else(|| "-".to_string(), |s| s.to_string());
        Self(format!("{head}:{mtime}:{size}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn test_token(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Identifies one cache slot. Distinct tokens for the same `(path, line)`
/// never collide: equality covers all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: PathBuf,
    /// One-based line number.
    pub line: u32,
    pub token: VolatilityToken,
}

/// Repository-rooted identity for a file. Cheap to recompute, so it is
/// derived fresh per trigger and never cached across invocations.
#[derive(Debug, Clone)]
pub struct FileIdentity {
    /// Repository root, absolute.
    pub root: PathBuf,
    /// Path of the queried file relative to `root`, with `/` separators.
    pub rel_path: String,
    pub token: VolatilityToken,
}

impl FileIdentity {
    pub fn cache_key(&self, path: &Path, line: u32) -> CacheKey {
        CacheKey {
            path: path.to_path_buf(),
            line,
            token: self.token.clone(),
        }
    }
}

/// Determine whether `path` lies inside a git tree and, if so, produce its
/// identity. `None` means "not applicable" (outside any repository, no
/// parent directory, path not under the discovered root) and must never be
/// surfaced as an error.
///
/// The revision and the file metadata are fetched concurrently; either may
/// be missing and degrades to a placeholder inside the token.
pub async fn derive(path: &Path) -> Option<FileIdentity> {
    let dir = path.parent()?;
    let root = invoker::repo_root(dir).await?;

    let (head, meta) = tokio::join!(invoker::head_revision(&root), tokio::fs::metadata(path));

    let meta = meta.ok();
    let mtime_ms = meta
        .as_ref()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
    let size = meta.as_ref().map(|m| m.len());

    // git reports a canonical root; fall back to the canonicalized file path
    // when the editor handed us a non-canonical one (symlinked temp dirs).
    let rel = match path.strip_prefix(&root) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => tokio::fs::canonicalize(path)
            .await
            .ok()?
            .strip_prefix(&root)
            .ok()?
            .to_path_buf(),
    };
    let rel_path = rel.to_string_lossy().replace('\\', "/");

    Some(FileIdentity {
        root,
        rel_path,
        token: VolatilityToken::new(head.as_deref(), mtime_ms, size),
    })
}
