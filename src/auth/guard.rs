//! Decides whether a request path needs authentication.
//!
//! Exclusion entries are plain paths, paths with a trailing `/`, or prefix
//! patterns ending in `*`. Matching normalizes away a single trailing slash
//! on both sides, checks wildcard entries first (first match wins), then
//! falls back to exact membership among the remaining entries.

use crate::users::User;

/// Narrow view over an inbound request: header lookup by name, nothing else.
///
/// Implemented for [`http::HeaderMap`] so any framework built on the `http`
/// types plugs in directly; anything else only has to supply this one method.
pub trait HeaderSource {
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderSource for http::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Whether `path` requires authentication given the exclusion list.
///
/// A missing or empty path always requires auth, before the exclusion list
/// is even consulted; so does any path when the list is empty.
pub fn require_auth<S: AsRef<str>>(path: Option<&str>, excluded_paths: &[S]) -> bool {
    let path = match path {
        Some(p) if !p.is_empty() => p,
        _ => return true,
    };
    if excluded_paths.is_empty() {
        return true;
    }

    let normalized = path.strip_suffix('/').unwrap_or(path);

    for entry in excluded_paths {
        if let Some(prefix) = entry.as_ref().strip_suffix('*') {
            if normalized.starts_with(prefix) {
                return false;
            }
        }
    }

    let excluded = excluded_paths
        .iter()
        .map(|e| e.as_ref())
        .filter(|e| !e.ends_with('*'))
        .map(|e| e.strip_suffix('/').unwrap_or(e))
        .any(|e| e == normalized);

    !excluded
}

/// Raw `Authorization` header value, if the request and the header exist.
///
/// The header's scheme (`Basic`, `Bearer`, ...) is not parsed here; that is
/// the caller's job.
pub fn authorization_header(request: Option<&dyn HeaderSource>) -> Option<&str> {
    request?.header("Authorization")
}

/// Resolve the request to a stored user.
///
/// Identity resolution is not implemented at this layer; this always
/// returns `None`. A full implementation would decode the authorization
/// header and look the account up in the user store.
pub fn current_user(_request: Option<&dyn HeaderSource>) -> Option<User> {
    None
}
