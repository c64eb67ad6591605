//! # Test Helpers
//!
//! Small utilities that sit next to the dispatcher in a test suite:
//!
//! - [`FormData`] builds `multipart/form-data` bodies for write handlers
//! - [`seed_table`] / [`seed`] reset a database table to a known set of rows
//!   through a [`SqlDatabase`] binding in the [`Environment`](crate::env::Environment)

mod form;
mod seed;

pub use form::{FormData, FormFile, FormValue};
pub use seed::{seed, seed_table, SqlDatabase, Statement};
