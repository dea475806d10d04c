//! Error kinds surfaced to callers of the invitation pipeline.
use thiserror::Error;

/// Every failure the ingestion and synchronization layers can report.
/// Messages are the human-readable strings shown to the operator; none
/// of these are retried automatically.
#[derive(Debug, Error)]
pub enum InviteError {
    #[error("you need to be signed in to save invitations")]
    NotAuthenticated,
    #[error("unsupported file type '.{0}'; upload a CSV or Excel file")]
    UnsupportedFormat(String),
    #[error("unable to parse: {0}")]
    ParseFailure(String),
    #[error("no valid rows found; expected at least name and surname columns")]
    NoValidRows,
    #[error("remote write failed: {0}")]
    RemoteWriteFailure(String),
    #[error("remote read failed: {0}")]
    RemoteReadFailure(String),
}
