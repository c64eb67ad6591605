use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Marker that turns a path segment into a named parameter (`:id`).
pub const PARAM_MARKER: char = ':';

/// One entry of a declarative route table.
///
/// `path` is relative to the parent entry; an empty path is an index route that
/// shares its parent's canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDef {
    #[serde(default)]
    pub path: String,
    /// Opaque reference handed to the [`Loader`](crate::dispatcher::Loader).
    #[serde(alias = "file")]
    pub handler: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDef>,
}

impl RouteDef {
    #[must_use]
    pub fn new(path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handler: handler.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteDef>) -> Self {
        self.children = children;
        self
    }

    /// Number of entries in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RouteDef::node_count).sum::<usize>()
    }
}

/// Where a route table comes from.
pub enum RouteSource {
    /// Definitions supplied directly by the caller.
    Inline(Vec<RouteDef>),
    /// A YAML or JSON file, see [`load_route_table`](super::load_route_table).
    File(PathBuf),
    /// A function that produces the definitions on demand.
    Loader(Box<dyn Fn() -> anyhow::Result<Vec<RouteDef>> + Send + Sync>),
}

impl RouteSource {
    /// Produce the nested route definitions.
    pub fn resolve(&self) -> anyhow::Result<Vec<RouteDef>> {
        match self {
            RouteSource::Inline(defs) => Ok(defs.clone()),
            RouteSource::File(path) => super::load_route_table(path),
            RouteSource::Loader(load) => load(),
        }
    }

    pub fn loader<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<Vec<RouteDef>> + Send + Sync + 'static,
    {
        RouteSource::Loader(Box::new(f))
    }
}

impl fmt::Debug for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSource::Inline(defs) => f.debug_tuple("Inline").field(&defs.len()).finish(),
            RouteSource::File(path) => f.debug_tuple("File").field(path).finish(),
            RouteSource::Loader(_) => f.write_str("Loader(..)"),
        }
    }
}

impl From<Vec<RouteDef>> for RouteSource {
    fn from(defs: Vec<RouteDef>) -> Self {
        RouteSource::Inline(defs)
    }
}

impl From<PathBuf> for RouteSource {
    fn from(path: PathBuf) -> Self {
        RouteSource::File(path)
    }
}
