use tracing::trace;

use crate::ingest::decode::RawRow;
use crate::model::Recipient;

/// Normalize one decoded row into a recipient candidate.
///
/// The format is positional: values are taken in column order, trimmed,
/// and empties dropped; the first survivor becomes the first name, the
/// second the last name, extras are ignored. Rows with fewer than two
/// survivors are dropped silently; only the aggregate outcome is
/// reported to the caller.
pub fn normalize_row(row: &RawRow, position: usize) -> Option<Recipient> {
    let trimmed: Vec<&str> = row
        .values()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();
    if trimmed.len() < 2 {
        trace!(position, "dropping row with fewer than two usable values");
        return None;
    }
    Some(Recipient {
        first_name: trimmed[0].to_string(),
        last_name: trimmed[1].to_string(),
    })
}
