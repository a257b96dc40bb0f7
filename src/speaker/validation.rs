//! Membership checks for backend-declared token sets.

use crate::error::{Result, SpeechError};

/// Return the accepted token equal to `value`, or an `InvalidParameter` error
/// naming `what`.
pub fn accept<'a, S: AsRef<str>>(what: &'static str, value: &str, accepted: &'a [S]) -> Result<&'a str> {
    accepted
        .iter()
        .map(AsRef::as_ref)
        .find(|token| *token == value)
        .ok_or_else(|| SpeechError::invalid(what, value))
}

/// Like [`accept`], but an empty `value` means "no constraint" and yields `None`.
pub fn accept_optional<'a, S: AsRef<str>>(
    what: &'static str,
    value: &str,
    accepted: &'a [S],
) -> Result<Option<&'a str>> {
    if value.is_empty() {
        return Ok(None);
    }
    accept(what, value, accepted).map(Some)
}

/// Map the spellings people use for Ogg Vorbis onto the canonical tag.
/// Other formats are returned unchanged.
pub fn normalize_output_format(format: &str) -> &str {
    match format {
        "ogg" | "oggvorbis" | "ogg-vorbis" => "ogg_vorbis",
        other => other,
    }
}
