//! # Router Module
//!
//! The router resolves a request path against a hierarchical route table and
//! reports which handler module serves it.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling nested [`RouteDef`](crate::table::RouteDef)s into a flat arena
//! - Computing each node's canonical path (parent path + own segment, normalized)
//! - Matching a target path to the first node, in declaration order, whose
//!   canonical path equals it or matches it segment by segment
//! - Extracting `:param` values from the target once a node has been chosen
//!
//! ## Matching rules
//!
//! 1. The target is normalized: empty becomes `/`, trailing slashes are dropped.
//! 2. A node matches when its canonical path equals the target exactly, or when
//!    both split into the same number of segments and every static segment is
//!    equal (dynamic `:name` segments accept anything).
//! 3. All nodes at one level are tried before descending; the first hit wins.
//!
//! ## Example
//!
//! ```rust
//! use routeshim::router::RouteTable;
//! use routeshim::table::RouteDef;
//!
//! let table = RouteTable::new(&[
//!     RouteDef::new("/api", "api").with_children(vec![RouteDef::new("users/:id", "user")]),
//! ]);
//!
//! let route = table.resolve("/api/users/42").unwrap();
//! assert_eq!(&*route.handler_ref, "user");
//! assert_eq!(&*route.canonical_path, "/api/users/:id");
//! assert_eq!(route.params("/api/users/42")[0].1, "42");
//! ```

mod core;
mod path;

pub use self::core::{params_to_map, NodeId, ParamVec, ResolvedRoute, RouteTable, MAX_INLINE_PARAMS};
pub use path::{
    extract_params, join_path, normalize_path, param_name, segments_match, split_segments,
    strip_query,
};
