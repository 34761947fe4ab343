//! Remote path helpers
//!
//! Remote paths are plain strings: the remote separator may differ from the
//! local one, so `std::path` is never used for them.

/// A remote path is absolute when it starts with the separator.
pub fn is_absolute(path: &str, separator: char) -> bool {
    path.starts_with(separator)
}

/// Append `name` to `base` with exactly one separator between them.
pub fn join(base: &str, name: &str, separator: char) -> String {
    let name = name.trim_start_matches(separator);
    if name.is_empty() {
        return base.to_string();
    }
    let trimmed = base.trim_end_matches(separator);
    if trimmed.is_empty() && base.starts_with(separator) {
        return format!("{}{}", separator, name);
    }
    format!("{}{}{}", trimmed, separator, name)
}

/// Last component of a remote path, ignoring trailing separators.
pub fn base_name(path: &str, separator: char) -> &str {
    let trimmed = path.trim_end_matches(separator);
    match trimmed.rfind(separator) {
        Some(idx) => &trimmed[idx + separator.len_utf8()..],
        None => trimmed,
    }
}
