use thiserror::Error;

/// Failures of the tag reader. All of them degrade to the same fallback
/// display, but `Unavailable` (no reader at all) is kept apart from a file
/// that simply could not be parsed.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata reader unavailable")]
    Unavailable,

    #[error("no metadata found")]
    NoTags,

    #[error("failed to read tags: {0}")]
    Read(#[from] lofty::error::LoftyError),
}
