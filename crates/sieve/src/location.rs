// ABOUTME: Location classifier deciding whether an input line is a URL or a file path.
// ABOUTME: Routes http:/https:-prefixed lines (case-insensitive) to the fetch path.

/// How a location should be resolved to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Fetch over HTTP(S).
    Url,
    /// Open from the local filesystem.
    File,
}

/// Classify a trimmed input line.
///
/// Anything whose lowercase form starts with `http:` or `https:` goes to the
/// fetch path; everything else is treated as a file path. No validation beyond
/// the prefix check: a string that merely starts with one of these prefixes is
/// still routed to the fetch path and fails there.
pub fn classify(location: &str) -> LocationKind {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http:") || lower.starts_with("https:") {
        LocationKind::Url
    } else {
        LocationKind::File
    }
}
