//! Materialized path codec
//!
//! A node's `name` is its ancestors' titles joined by [`SEPARATOR`]. Titles are
//! normalized so that the separator can never straddle a title boundary, which
//! makes separator counting an exact depth measure and makes prefix matching
//! unambiguous.

use crate::error::BuildError;
use crate::types::{Level, RecordId};

/// Reserved path separator
pub const SEPARATOR: &str = " > ";

const SEPARATOR_CHAR: char = '>';

/// Normalize a source title.
///
/// Surrounding whitespace is trimmed. A missing or blank title becomes the
/// deterministic placeholder `untitled-<id>`; the flag reports whether the
/// placeholder was used.
pub fn normalize_title(raw: Option<&str>, id: RecordId) -> Result<(String, bool), BuildError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok((placeholder_title(id), true));
    }
    check_title(trimmed)?;
    Ok((trimmed.to_string(), false))
}

pub fn placeholder_title(id: RecordId) -> String {
    format!("untitled-{}", id)
}

/// Reject titles that contain the separator or could form one with a neighbour.
pub fn check_title(title: &str) -> Result<(), BuildError> {
    if title.contains(SEPARATOR)
        || title.starts_with(SEPARATOR_CHAR)
        || title.ends_with(SEPARATOR_CHAR)
        || title != title.trim()
    {
        return Err(BuildError::ReservedSeparator {
            title: title.to_string(),
        });
    }
    Ok(())
}

/// Join a parent's materialized path with a child title
pub fn child_name(parent: &str, title: &str) -> String {
    let mut name = String::with_capacity(parent.len() + SEPARATOR.len() + title.len());
    name.push_str(parent);
    name.push_str(SEPARATOR);
    name.push_str(title);
    name
}

/// Number of separators in a path; 0 for the root or an absent path
pub fn path_depth(path: Option<&str>) -> Level {
    match path {
        Some(p) if !p.is_empty() => p.matches(SEPARATOR).count() as Level,
        _ => 0,
    }
}

/// Whether `name` is a strict descendant of `prefix`.
///
/// The separator suffix keeps "Cat" from claiming the children of "Caterpillar".
pub fn is_under(name: &str, prefix: &str) -> bool {
    name.len() > prefix.len() + SEPARATOR.len()
        && name.starts_with(prefix)
        && name[prefix.len()..].starts_with(SEPARATOR)
}

/// Whether `name` is `prefix` itself or one of its descendants
pub fn is_at_or_under(name: &str, prefix: &str) -> bool {
    name == prefix || is_under(name, prefix)
}

/// Last segment of a materialized path
pub fn last_segment(name: &str) -> &str {
    match name.rfind(SEPARATOR) {
        Some(idx) => &name[idx + SEPARATOR.len()..],
        None => name,
    }
}

/// Treat an empty path the same as an absent one
pub fn normalize_path(path: Option<&str>) -> Option<&str> {
    path.filter(|p| !p.is_empty())
}
