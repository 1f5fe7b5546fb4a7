//! Resolution of stored asset paths into publicly reachable URLs.

const STORAGE_PREFIX: &str = "/storage/";

/// Turn a stored path into a URL the public site can render.
///
/// Absolute `http(s)` URLs pass through untouched; relative storage paths are
/// served from the `/storage/` prefix. Empty paths resolve to nothing.
pub fn resolve_public_url(path: Option<&str>) -> Option<String> {
    let path = path?;
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!("{STORAGE_PREFIX}{}", path.trim_start_matches('/')))
}
