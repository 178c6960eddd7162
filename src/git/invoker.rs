//! External git queries.
//!
//! A closed set of four read-only query shapes: repository root discovery,
//! current revision, single-line blame, and remote URL lookup. Each returns
//! trimmed (or, for blame, raw) stdout on success. A missing executable, a
//! spawn failure and a non-zero exit all collapse to `None`; callers do not
//! distinguish the causes.

use std::path::{Path, PathBuf};

use tokio::process::Command;

/// Upper bound on blame stdout. A single-line porcelain blame is small; an
/// answer larger than this is treated as a failed query.
const MAX_BLAME_OUTPUT_BYTES: usize = 64 * 1024;

/// The queries the server is allowed to issue, one variant per shape.
#[derive(Debug)]
enum GitQuery<'a> {
    RepoRoot { dir: &'a Path },
    HeadRevision { root: &'a Path },
    BlameLine { root: &'a Path, rel_path: &'a str, line: u32 },
    RemoteUrl { root: &'a Path },
}

impl GitQuery<'_> {
    fn working_dir(&self) -> &Path {
        match self {
            GitQuery::RepoRoot { dir } => dir,
            GitQuery::HeadRevision { root }
            | GitQuery::BlameLine { root, .. }
            | GitQuery::RemoteUrl { root } => root,
        }
    }

    fn args(&self) -> Vec<String> {
        match self {
            GitQuery::RepoRoot { .. } => {
                vec!["rev-parse".into(), "--show-toplevel".into()]
            }
            GitQuery::HeadRevision { .. } => vec!["rev-parse".into(), "HEAD".into()],
            GitQuery::BlameLine { rel_path, line, .. } => vec![
                "blame".into(),
                "--porcelain".into(),
                "-L".into(),
                format!("{line},{line}"),
                "--".into(),
                (*rel_path).to_string(),
            ],
            GitQuery::RemoteUrl { .. } => {
                vec!["remote".into(), "get-url".into(), "origin".into()]
            }
        }
    }

    fn max_output_bytes(&self) -> Option<usize> {
        match self {
            GitQuery::BlameLine { .. } => Some(MAX_BLAME_OUTPUT_BYTES),
            _ => None,
        }
    }

    async fn run(&self) -> Option<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.working_dir())
            .args(self.args())
            .output()
            .await
            .ok()?;
        if !output.status.success() {
            return None;
        }
        if let Some(max) = self.max_output_bytes() {
            if output.stdout.len() > max {
                tracing::warn!("blame output exceeded {} bytes, dropping", max);
                return None;
            }
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Discover the repository root containing `dir`.
pub async fn repo_root(dir: &Path) -> Option<PathBuf> {
    let out = GitQuery::RepoRoot { dir }.run().await?;
    let trimmed = out.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

/// Current revision identifier of the repository at `root`.
pub async fn head_revision(root: &Path) -> Option<String> {
    let out = GitQuery::HeadRevision { root }.run().await?;
    let trimmed = out.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Raw porcelain blame output for a single one-based line.
pub async fn blame_line(root: &Path, rel_path: &str, line: u32) -> Option<String> {
    GitQuery::BlameLine {
        root,
        rel_path,
        line,
    }
    .run()
    .await
}

/// Raw URL of the `origin` remote.
pub async fn remote_url(root: &Path) -> Option<String> {
    let out = GitQuery::RemoteUrl { root }.run().await?;
    let trimmed = out.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
