//! Ownership derivation from `owner/name` repository identifiers.

use thiserror::Error;

/// Character separating the owner from the repository name.
pub const SEPARATOR: char = '/';

/// Why a repository identifier has no derivable owner.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerError {
    /// Value begins with the separator, so the owner component is empty.
    #[error("repo_name starts with /")]
    LeadingSeparator,

    /// Value contains no separator at all.
    #[error("repo_name has no / separator")]
    MissingSeparator,

    /// Value contains more than one separator.
    #[error("repo_name has more than one / separator")]
    ExtraSeparator,
}

/// Return the owner component of `repo`.
///
/// `"alice/widgets"` yields `"alice"`. A trailing separator (`"alice/"`) is
/// accepted since the owner is still non-empty.
///
/// # Errors
///
/// Returns an [`OwnerError`] when the value does not contain exactly one
/// separator preceded by a non-empty owner.
pub fn parse_owner(repo: &str) -> Result<&str, OwnerError> {
    if repo.starts_with(SEPARATOR) {
        return Err(OwnerError::LeadingSeparator);
    }

    let (owner, rest) = repo
        .split_once(SEPARATOR)
        .ok_or(OwnerError::MissingSeparator)?;

    if rest.contains(SEPARATOR) {
        return Err(OwnerError::ExtraSeparator);
    }

    Ok(owner)
}
