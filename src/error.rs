//! User-facing failure reasons for the open-permalink action.
//!
//! Opportunistic lookups (the initial code-action offer) never surface these;
//! they collapse to "no actions" instead. Once the user has picked the action,
//! failures are reported as editor warnings with one of these fixed messages.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("not in a repository")]
    NotInRepository,

    #[error("no remote found")]
    NoRemote,

    #[error("no attribution for that line")]
    NoAttribution,

    #[error("unsupported remote URL: `{0}`")]
    UnsupportedRemote(String),
}

pub type Result<T> = std::result::Result<T, ActionError>;
