//! Remote URL normalization and permalink construction.
//!
//! Raw `origin` URLs come in several dialects (plain HTTPS, SCP-like
//! `user@host:org/repo`, explicit `ssh://`). They normalize to a canonical
//! HTTPS base; anything else is unsupported rather than best-effort guessed.
//! The permalink path convention `/blob/<commit>/<path>#L<line>` works on
//! the major hosted forges without per-platform branching.

/// Normalize a raw remote URL to an HTTPS base with any trailing `.git`
/// suffix and trailing slash stripped. `None` means the dialect is not
/// supported.
pub fn normalize_remote(raw: &str) -> Option<String> {
    let raw = raw.trim();

    let base = if raw.starts_with("https://") {
        raw.to_string()
    } else if let Some(rest) = raw.strip_prefix("ssh://") {
        let (authority, path) = rest.split_once('/')?;
        // Authority may carry a user prefix and a port suffix.
        let host = authority.rsplit('@').next()?.split(':').next()?;
        if host.is_empty() || path.is_empty() {
            return None;
        }
        format!("https://{host}/{path}")
    } else if !raw.contains("://") {
        // SCP-like: user@host:org/repo
        let (_user, rest) = raw.split_once('@')?;
        let (host, path) = rest.split_once(':')?;
        if host.is_empty() || path.is_empty() {
            return None;
        }
        format!("https://{host}/{path}")
    } else {
        return None;
    };

    let base = base.trim_end_matches('/');
    let base = base.strip_suffix(".git").unwrap_or(base);
    Some(base.trim_end_matches('/').to_string())
}

/// Build `<base>/blob/<commit>/<path>#L<line>`, percent-encoding each path
/// segment independently (separators preserved) and the commit id as a
/// whole.
pub fn build_permalink(base: &str, rel_path: &str, commit: &str, line: u32) -> String {
    let encoded_path = rel_path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!(
        "{base}/blob/{}/{encoded_path}#L{line}",
        urlencoding::encode(commit)
    )
}

#[cfg(test)]
mod tests {
    use super::{build_permalink, normalize_remote};

    #[test]
    fn scp_like_remote_normalizes() {
        assert_eq!(
            normalize_remote("git@github.com:org/repo.git").as_deref(),
            Some("https://github.com/org/repo")
        );
    }

    #[test]
    fn https_remote_passes_through_with_suffix_stripped() {
        assert_eq!(
            normalize_remote("https://gitlab.com/org/repo.git").as_deref(),
            Some("https://gitlab.com/org/repo")
        );
        assert_eq!(
            normalize_remote("https://gitlab.com/org/repo/").as_deref(),
            Some("https://gitlab.com/org/repo")
        );
    }

    #[test]
    fn ssh_remote_normalizes_and_drops_user_and_port() {
        assert_eq!(
            normalize_remote("ssh://git@bitbucket.org:22/org/repo.git").as_deref(),
            Some("https://bitbucket.org/org/repo")
        );
        assert_eq!(
            normalize_remote("ssh://github.com/org/repo").as_deref(),
            Some("https://github.com/org/repo")
        );
    }

    #[test]
    fn unrecognized_dialects_are_unsupported() {
        assert!(normalize_remote("ftp://example.com/x").is_none());
        assert!(normalize_remote("example.com/org/repo").is_none());
        assert!(normalize_remote("").is_none());
    }

    #[test]
    fn permalink_encodes_each_path_segment() {
        let link = build_permalink(
            "https://github.com/org/repo",
            "src/a b.ts",
            "abc123def456",
            42,
        );
        assert_eq!(
            link,
            "https://github.com/org/repo/blob/abc123def456/src/a%20b.ts#L42"
        );
    }

    #[test]
    fn permalink_preserves_separators_between_encoded_segments() {
        let link = build_permalink("https://gitlab.com/o/r", "a/b c/d%e.rs", "ff00", 1);
        assert_eq!(link, "https://gitlab.com/o/r/blob/ff00/a/b%20c/d%25e.rs#L1");
    }
}
