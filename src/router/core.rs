//! Router core module - route table compilation and resolution.

use super::path::{
    extract_params, join_path, normalize_path, param_name, segments_match, split_segments,
};
use crate::table::{RouteDef, RouteSource};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Maximum number of path parameters before heap allocation.
/// Most routes have ≤4 dynamic segments (e.g., /users/:id/posts/:postId).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Ordered `(name, value)` parameter storage.
///
/// Param names use `Arc<str>` since they come from the route table; values are
/// per-request data from the target path.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Convert extracted params to a map.
///
/// Uses "last write wins" semantics: if a pattern repeats a parameter name
/// (e.g. `/org/:id/user/:id`), the later segment's value is kept.
#[must_use]
pub fn params_to_map(params: &ParamVec) -> HashMap<String, String> {
    params
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Index of a node inside a [`RouteTable`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct RouteNode {
    handler_ref: Arc<str>,
    canonical_path: Arc<str>,
    children: Vec<NodeId>,
}

/// Result of successfully resolving a target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Opaque module reference copied from the matched node
    pub handler_ref: Arc<str>,
    /// Slash-joined, normalized path from the table root to the matched node
    pub canonical_path: Arc<str>,
}

impl ResolvedRoute {
    /// Extract the dynamic-segment values of `target` for this route.
    #[must_use]
    pub fn params(&self, target: &str) -> ParamVec {
        extract_params(&self.canonical_path, target)
    }

    /// Number of dynamic segments in the canonical path.
    #[must_use]
    pub fn param_count(&self) -> usize {
        split_segments(&self.canonical_path)
            .filter(|s| param_name(s).is_some())
            .count()
    }
}

/// Compiled, read-only route table.
///
/// Nodes live in a flat arena in pre-order, so declaration order is preserved
/// and resolution is deterministic: the first node (by traversal order) that
/// matches wins. There is no "most specific route" scoring.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    nodes: Vec<RouteNode>,
    roots: Vec<NodeId>,
}

impl RouteTable {
    /// Compile nested route definitions into an arena.
    #[must_use]
    pub fn new(defs: &[RouteDef]) -> Self {
        let mut table = Self::default();
        let roots: Vec<NodeId> = defs.iter().map(|def| table.push(def, "")).collect();
        table.roots = roots;

        let summary: Vec<String> = table
            .nodes
            .iter()
            .take(10)
            .map(|n| format!("{} -> {}", n.canonical_path, n.handler_ref))
            .collect();

        info!(
            routes_count = table.nodes.len(),
            top_level = table.roots.len(),
            routes_summary = ?summary,
            "Route table loaded"
        );

        table
    }

    /// Resolve a [`RouteSource`] and compile it.
    pub fn from_source(source: &RouteSource) -> anyhow::Result<Self> {
        let defs = source.resolve()?;
        Ok(Self::new(&defs))
    }

    fn push(&mut self, def: &RouteDef, parent_path: &str) -> NodeId {
        let canonical_path = join_path(parent_path, &def.path);
        let id = NodeId(self.nodes.len());
        self.nodes.push(RouteNode {
            handler_ref: Arc::from(def.handler.as_str()),
            canonical_path: Arc::from(canonical_path.as_str()),
            children: Vec::with_capacity(def.children.len()),
        });

        for child in &def.children {
            let child_id = self.push(child, &canonical_path);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Number of nodes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve a target path to a route.
    ///
    /// Siblings are checked before any of their children; when none of them
    /// matches, each sibling's subtree is searched in declaration order.
    ///
    /// # Returns
    ///
    /// * `Some(ResolvedRoute)` - The first matching node
    /// * `None` - No node matches; see [`RouteTable::canonical_paths`] for diagnostics
    #[must_use]
    pub fn resolve(&self, target: &str) -> Option<ResolvedRoute> {
        let target = normalize_path(target);

        // RT1: Route match attempt
        debug!(path = %target, routes_count = self.nodes.len(), "Route match attempt");

        let match_start = Instant::now();
        let found = self.find(&self.roots, &target);
        let duration_us = match_start.elapsed().as_micros();

        match found {
            Some(id) => {
                let node = &self.nodes[id.0];
                // RT2: Route matched
                debug!(
                    path = %target,
                    handler_ref = %node.handler_ref,
                    route_pattern = %node.canonical_path,
                    duration_us = duration_us,
                    "Route matched"
                );
                Some(ResolvedRoute {
                    handler_ref: Arc::clone(&node.handler_ref),
                    canonical_path: Arc::clone(&node.canonical_path),
                })
            }
            None => {
                // RT3: No route found
                warn!(path = %target, duration_us = duration_us, "No route matched");
                None
            }
        }
    }

    fn find(&self, level: &[NodeId], target: &str) -> Option<NodeId> {
        let hit = level.iter().copied().find(|id| {
            let path = &self.nodes[id.0].canonical_path;
            path.as_ref() == target || segments_match(path, target)
        });
        if hit.is_some() {
            return hit;
        }

        level
            .iter()
            .find_map(|id| self.find(&self.nodes[id.0].children, target))
    }

    /// Every canonical path in the table, de-duplicated and sorted ascending.
    ///
    /// Index routes share their parent's path and therefore appear once.
    #[must_use]
    pub fn canonical_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .nodes
            .iter()
            .map(|n| n.canonical_path.to_string())
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }

    /// `(canonical path, handler reference)` for every node, sorted by path and
    /// then by declaration order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .nodes
            .iter()
            .map(|n| (n.canonical_path.as_ref(), n.handler_ref.as_ref()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
