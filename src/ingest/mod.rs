//! Ingestion pipeline: raw tabular file → validated recipients.
//!
//! Split into two submodules:
//! - `decode`: file payload → uniform header-keyed rows (CSV rule set).
//! - `normalize`: one row → a recipient candidate, or a silent drop.
//!
//! `import_recipients` runs the whole pipeline; the caller owns all
//! file I/O and hands in bytes plus the declared file name.

pub mod decode;
pub mod normalize;

pub use decode::{decode, FileKind, RawRow};
pub use normalize::normalize_row;

use tracing::debug;

use crate::error::InviteError;
use crate::model::Recipient;

/// Decode and normalize an uploaded file into recipients.
///
/// Partial or malformed rows are skipped rather than failing the whole
/// import; only when nothing survives is `NoValidRows` returned.
pub fn import_recipients(bytes: &[u8], file_name: &str) -> Result<Vec<Recipient>, InviteError> {
    let kind = FileKind::from_file_name(file_name)?;
    let rows = decode(bytes, kind)?;
    let recipients: Vec<Recipient> = rows
        .iter()
        .enumerate()
        .filter_map(|(position, row)| normalize_row(row, position))
        .collect();
    if recipients.is_empty() {
        return Err(InviteError::NoValidRows);
    }
    debug!(count = recipients.len(), file = file_name, "imported recipients");
    Ok(recipients)
}
