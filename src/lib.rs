//! Blame resolution and permalink engine behind the blamelink language server.
//!
//! The server offers a one-line git attribution label as a code action and,
//! when the action is taken, opens a commit-pinned permalink on the hosting
//! forge. Everything git-related goes through external `git` processes; the
//! results are held in a bounded LRU cache keyed by file identity plus a
//! volatility token.

pub mod error;
pub mod format;
pub mod git;
pub mod models;
pub mod permalink;
pub mod server;
