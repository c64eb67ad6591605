//! # Route Table Module
//!
//! Declarative route tables: the nested `{ path, handler, children }` records that
//! describe which handler module serves which URL pattern, plus the ways a table can
//! be supplied at setup time (inline, from a YAML/JSON file, or from a loader
//! function).
//!
//! The router never re-reads a table. [`RouteSource::resolve`] runs once and the
//! resulting definitions are compiled into a [`RouteTable`](crate::router::RouteTable).
//!
//! ## Table format
//!
//! ```yaml
//! routes:
//!   - path: /api
//!     handler: routes/api.rs
//!     children:
//!       - path: users/:id
//!         handler: routes/api/user.rs
//!       - path: ""
//!         file: routes/api/index.rs
//! ```
//!
//! `file` is accepted as an alias of `handler`. A bare list (without the
//! `routes:` key) is accepted as well.

mod load;
mod types;

pub use load::*;
pub use types::*;
