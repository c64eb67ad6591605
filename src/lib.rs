//! # routeshim
//!
//! **routeshim** drives file-routed request handlers from tests without starting a
//! server. A path goes in, the route table picks the handler module, the handler runs
//! in-process and its result comes back as a normalized [`Response`].
//!
//! ## Overview
//!
//! Handlers are grouped in modules that expose at most two entry points: a read
//! handler (GET and HEAD) and a write handler (every other method). A route table maps
//! URL patterns to opaque module references, and a [`Loader`](dispatcher::Loader)
//! turns a reference into a module.
//!
//! ## Architecture
//!
//! - **[`table`]** - Nested route definitions and where they are loaded from
//! - **[`router`]** - Route table compilation, first-match resolution and `:param` extraction
//! - **[`dispatcher`]** - Module loading, handler selection and response normalization
//! - **[`request`]** / **[`response`]** - Handler requests and normalized responses
//! - **[`env`]** - Named environment bindings passed to every handler
//! - **[`helpers`]** - Multipart form bodies and database seeding for test setup
//! - **[`config`]** / **[`logging`]** - Setup-time configuration and `tracing` output
//! - **[`cli`]** - Route table inspection from the command line
//!
//! ### Invocation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Test
//!     participant Dispatcher
//!     participant Table as RouteTable
//!     participant Loader
//!     participant Handler
//!     participant Normalize as normalize
//!
//!     Test->>Dispatcher: invoke("/api/users/42", init)
//!     Dispatcher->>Table: resolve("/api/users/42")
//!     alt No Route Match
//!         Table-->>Test: RouteNotFound (known paths)
//!     end
//!     Table-->>Dispatcher: handler_ref + "/api/users/:id"
//!     Dispatcher->>Loader: load(handler_ref)
//!     alt Load Failed
//!         Loader-->>Test: ModuleLoad
//!     end
//!     Loader-->>Dispatcher: HandlerModule
//!     Dispatcher->>Dispatcher: GET/HEAD → read, else write
//!     alt Capability Missing
//!         Dispatcher-->>Test: HandlerNotFound
//!     end
//!     Dispatcher->>Dispatcher: merge params {id: "42"} + explicit
//!     Dispatcher->>Handler: call({ request, params, context })
//!     Handler-->>Dispatcher: HandlerOutput
//!     Dispatcher->>Normalize: Response | { data, init } | payload
//!     Normalize-->>Test: Response
//! ```
//!
//! ### Key Patterns
//!
//! 1. **First Match Wins**: Siblings are tried before their children, in declaration order
//! 2. **Tagged Modules**: A module is `None`, `ReadOnly`, `WriteOnly` or `Both`
//! 3. **Typed Failures**: Every failure surfaces as a [`DispatchError`](dispatcher::DispatchError)
//!
//! ## Quick Start
//!
//! ```rust
//! use routeshim::dispatcher::{
//!     Dispatcher, HandlerArgs, HandlerModule, HandlerOutput, ModuleRegistry,
//! };
//! use routeshim::env::Environment;
//! use routeshim::request::RequestInit;
//! use routeshim::response::ResponseInit;
//! use routeshim::router::RouteTable;
//! use routeshim::table::RouteDef;
//! use std::sync::Arc;
//!
//! async fn create_user(args: HandlerArgs) -> anyhow::Result<HandlerOutput> {
//!     let body: serde_json::Value = args.request.json()?.unwrap_or_default();
//!     Ok(HandlerOutput::data(body, ResponseInit::status(201)))
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let table = RouteTable::new(&[
//!     RouteDef::new("/api", "api").with_children(vec![RouteDef::new("users", "api/users")]),
//! ]);
//! let registry = ModuleRegistry::new().with("api/users", HandlerModule::write(create_user));
//! let dispatcher = Dispatcher::new(table, Arc::new(registry), Environment::empty());
//!
//! let resp = dispatcher
//!     .post("/api/users", RequestInit::new().json(&serde_json::json!({ "name": "ada" })))
//!     .await
//!     .unwrap();
//! assert_eq!(resp.status, 201);
//! assert_eq!(resp.status_text, "Created");
//! # });
//! ```
//!
//! ## Runtime Considerations
//!
//! Handlers are `async` and the dispatcher never spawns tasks, so any executor works.
//! The test suites use `#[tokio::test]`.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod env;
pub mod helpers;
pub mod ids;
pub mod logging;
pub mod request;
pub mod response;
pub mod router;
pub mod table;

pub use config::ShimConfig;
pub use dispatcher::{DispatchError, Dispatcher, HandlerModule, HandlerOutput, ModuleRegistry};
pub use env::Environment;
pub use request::{RequestInit, TestRequest};
pub use response::{Response, ResponseInit};
pub use router::RouteTable;
pub use table::RouteDef;
