//! # CLI Module
//!
//! Command-line tooling for checking a route table outside a test run.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print every route as `{ path, handler }`, sorted by path:
//!
//! ```bash
//! routeshim routes --table routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Resolve one path the same way the dispatcher does (first match wins):
//!
//! ```bash
//! routeshim resolve --table routes.yaml /api/users/42?verbose=1
//! ```
//!
//! A miss exits non-zero and lists the known paths.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use routeshim::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(cli)?;
//! ```

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
