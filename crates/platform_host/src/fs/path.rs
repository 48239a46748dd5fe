//! Store-path normalization helpers shared across host abstractions.
//!
//! Store paths are slash-separated and unanchored: the empty string is the store root, and
//! `"Desktop/notes.md"` names a file two levels down. Helpers here never touch the network.

/// Normalizes a store path: trims whitespace, converts backslashes to `/`, collapses duplicate
/// separators, resolves `.`/`..`, and strips any leading or trailing slash. Returns the empty
/// string for the store root.
pub fn normalize_store_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut segments: Vec<&str> = Vec::new();
    let normalized = trimmed.replace('\\', "/");
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Returns the final path segment, or the empty string for the root.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns the parent directory of `path`, or `None` for the root.
pub fn parent_path(path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    match path.rfind('/') {
        Some(idx) => Some(path[..idx].to_string()),
        None => Some(String::new()),
    }
}

/// Joins a directory and a child name. An empty directory is the store root, so the child name
/// is returned as-is.
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Returns `true` when `candidate` is strictly inside `ancestor`.
///
/// A path is never a descendant of itself; everything except the root is a descendant of the
/// root.
pub fn is_descendant_path(ancestor: &str, candidate: &str) -> bool {
    if ancestor == candidate {
        return false;
    }
    if ancestor.is_empty() {
        return !candidate.is_empty();
    }
    candidate
        .strip_prefix(ancestor)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}
