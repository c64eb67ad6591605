//! # Dispatcher Module
//!
//! The dispatcher turns a path (or a prepared request) into a
//! [`Response`](crate::response::Response) without a network stack: it resolves the route,
//! loads the route's handler module, picks the read or write handler for the method, calls
//! it and normalizes the result.
//!
//! ## Overview
//!
//! - [`Loader`] resolves an opaque handler reference to a [`HandlerModule`];
//!   [`ModuleRegistry`] is the in-memory implementation used in tests
//! - [`HandlerModule`] is a tagged variant over the read/write capabilities, so the
//!   capability check is an exhaustive `match`
//! - [`HandlerOutput`] covers the three return shapes a handler may use
//!
//! ## Handler Registration
//!
//! ```rust
//! use routeshim::dispatcher::{
//!     Dispatcher, HandlerArgs, HandlerModule, HandlerOutput, ModuleRegistry,
//! };
//! use routeshim::env::Environment;
//! use routeshim::router::RouteTable;
//! use routeshim::table::RouteDef;
//! use routeshim::request::RequestInit;
//! use std::sync::Arc;
//!
//! async fn get_pet(args: HandlerArgs) -> anyhow::Result<HandlerOutput> {
//!     Ok(HandlerOutput::payload(serde_json::json!({ "id": args.param("id") })))
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let registry = ModuleRegistry::new().with("pets/get", HandlerModule::read(get_pet));
//! let table = RouteTable::new(&[RouteDef::new("/pets/:id", "pets/get")]);
//! let dispatcher = Dispatcher::new(table, Arc::new(registry), Environment::empty());
//!
//! let resp = dispatcher.invoke("/pets/7", RequestInit::new()).await.unwrap();
//! assert_eq!(resp.text(), Some(r#"{"id":"7"}"#));
//! # });
//! ```
//!
//! ## Request Flow
//!
//! 1. Route table resolves the query-less path → handler reference + canonical path
//! 2. Loader produces the module for the reference
//! 3. GET/HEAD select the read handler, every other method the write handler
//! 4. Path params are merged with explicit params (explicit wins)
//! 5. Handler runs with `{ request, params, context }`
//! 6. Output is normalized into a response
//!
//! ## Error Handling
//!
//! Every failure is returned to the caller as a [`DispatchError`]; nothing is
//! retried or replaced with a fallback response. Handler errors are wrapped in
//! [`DispatchError::Handler`] transparently so the original error can be downcast.

mod core;
mod error;
mod handler;
mod loader;
mod normalize;

pub use self::core::{Dispatcher, DEFAULT_BASE_URL};
pub use error::{DispatchError, LoadError};
pub use handler::{
    Capability, ExecutionContext, Handler, HandlerArgs, HandlerModule, InvocationContext,
    SharedHandler,
};
pub use loader::{Loader, ModuleRegistry};
pub use normalize::{normalize, HandlerOutput};
