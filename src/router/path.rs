//! Path normalization and segment-wise matching.
//!
//! These are the building blocks of [`RouteTable::resolve`](super::RouteTable::resolve).
//! Matching and parameter extraction are separate passes: a node is
//! first accepted or rejected as a whole, and only the winner has its parameters
//! pulled out of the target path.

use super::core::ParamVec;
use crate::table::PARAM_MARKER;
use std::sync::Arc;

/// Normalize a path for comparison.
///
/// An empty path is the root. Trailing slashes are stripped unless the whole
/// path is `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Join a parent's canonical path with a child segment.
///
/// The result always starts with `/`, never contains `//`, and is
/// trailing-slash normalized. An empty segment (index route) yields the
/// parent's path.
#[must_use]
pub fn join_path(parent: &str, segment: &str) -> String {
    let mut joined = String::with_capacity(parent.len() + segment.len() + 2);
    joined.push('/');
    for c in parent.chars().chain(std::iter::once('/')).chain(segment.chars()) {
        if c == '/' && joined.ends_with('/') {
            continue;
        }
        joined.push(c);
    }
    normalize_path(&joined)
}

/// Split on `/`, discarding empty segments (`"/a/"` and `"a"` both yield `["a"]`).
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Returns the parameter name when `segment` is a dynamic segment.
#[inline]
#[must_use]
pub fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(PARAM_MARKER)
}

/// Segment-wise comparison of a route pattern against a target path.
///
/// Segment counts must be equal. Dynamic segments accept any (non-empty) target
/// segment; static segments must be byte-for-byte equal.
#[must_use]
pub fn segments_match(route_path: &str, target: &str) -> bool {
    let route: Vec<&str> = split_segments(route_path).collect();
    let actual: Vec<&str> = split_segments(target).collect();

    if route.len() != actual.len() {
        return false;
    }

    route
        .iter()
        .zip(actual.iter())
        .all(|(expected, got)| param_name(expected).is_some() || expected == got)
}

/// Pull `{name: value}` pairs for every dynamic segment of `route_path`.
///
/// Positions with no corresponding target segment produce an empty value.
#[must_use]
pub fn extract_params(route_path: &str, target: &str) -> ParamVec {
    let actual: Vec<&str> = split_segments(target).collect();

    split_segments(route_path)
        .enumerate()
        .filter_map(|(idx, segment)| {
            let name = param_name(segment)?;
            let value = actual.get(idx).copied().unwrap_or_default();
            Some((Arc::from(name), value.to_string()))
        })
        .collect()
}

/// Drop the query string and fragment from a request path.
#[must_use]
pub fn strip_query(path: &str) -> &str {
    let end = path.find(&['?', '#'][..]).unwrap_or(path.len());
    &path[..end]
}
