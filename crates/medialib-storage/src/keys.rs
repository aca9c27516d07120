//! Object key derivation and URL mapping.

use uuid::Uuid;

/// Reduce a file name to characters that are safe in a storage key.
///
/// Runs of anything outside `[A-Za-z0-9._-]` collapse to a single `-`.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            out.push(ch);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Turn a caller hint into a unique object key.
///
/// The last segment gets a random prefix so repeated uploads of the same
/// name never overwrite each other.
pub fn object_key(destination_hint: &str) -> String {
    let segments: Vec<&str> = destination_hint
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();
    let (dirs, file) = match segments.split_last() {
        Some((file, dirs)) => (dirs.to_vec(), sanitize_file_name(file)),
        None => (Vec::new(), "file".to_string()),
    };
    let unique = format!("{}-{}", Uuid::new_v4().simple(), file);
    let mut parts: Vec<String> = dirs.iter().map(|d| sanitize_file_name(d)).collect();
    parts.push(unique);
    parts.join("/")
}

/// Public URL for an object key.
pub fn url_for(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}

/// Object key for a public URL, if the URL belongs to `base_url`.
pub fn key_for<'a>(base_url: &str, url: &'a str) -> Option<&'a str> {
    let base = base_url.trim_end_matches('/');
    url.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|key| !key.is_empty() && !key.split('/').any(|s| s == ".."))
}
