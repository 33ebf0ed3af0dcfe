//! Error types for the document engine and its archive format

use thiserror::Error;

use crate::model::grammar::GrammarViolation;

/// Errors raised by edit operations, paste and render derivation.
///
/// Every operation that returns one of these leaves the editor state untouched.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("structural invariant violated: {0}")]
    Structure(#[from] GrammarViolation),

    #[error("missing source: {0}")]
    MissingSource(String),

    #[error("{0}")]
    Precondition(String),

    #[error("paragraph item at index {0} has no speaker, it occurs before any paragraph start")]
    NoActiveSpeaker(usize),

    #[error("transcript correction {0}")]
    Correction(&'static str),

    #[error("failed to serialize clipboard document: {0}")]
    Clipboard(#[from] ArchiveError),
}

impl EditError {
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}

/// Errors raised while reading or writing a document archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive has no document.json")]
    MissingManifest,

    #[error("unversioned documents are not supported")]
    MissingVersion,

    #[error("unsupported document version {0}")]
    UnsupportedVersion(u64),

    #[error("document references source {0} which is not part of the archive")]
    MissingSource(String),

    #[error("document content is malformed: {0}")]
    InvalidContent(#[from] GrammarViolation),

    #[error("invalid document json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
