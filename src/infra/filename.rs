//! Filename generation for exported notes.

/// Characters that are not allowed in exported file names.
const UNSAFE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turns an arbitrary note title into a safe file name stem.
///
/// - Replaces `/ \ : * ? " < > |` with `_`
/// - Trims leading/trailing whitespace, then leading/trailing dots
/// - Returns "untitled" for empty results
///
/// Case, inner whitespace and non-ASCII characters are kept as-is.
///
/// # Examples
///
/// ```
/// use zendown::infra::sanitize;
///
/// assert_eq!(sanitize("a/b:c*d"), "a_b_c_d");
/// assert_eq!(sanitize("..hidden.."), "hidden");
/// assert_eq!(sanitize("   "), "untitled");
/// ```
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim().trim_matches('.');

    if trimmed.is_empty() {
        return "untitled".to_string();
    }

    trimmed.to_string()
}

/// File name for a single-note export: `{sanitized-title}.{extension}`.
pub fn export_filename(title: &str, extension: &str) -> String {
    format!("{}.{}", sanitize(title), extension)
}

/// Archive entry name for a note: `{sanitized-title}-{id}.md`.
///
/// The id suffix keeps notes whose titles sanitize to the same stem apart.
pub fn archive_entry_name(title: &str, id: i64) -> String {
    format!("{}-{}.md", sanitize(title), id)
}
