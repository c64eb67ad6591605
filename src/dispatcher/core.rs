//! Dispatcher core module - request dispatch from path to normalized response.

use super::error::DispatchError;
use super::handler::{Capability, ExecutionContext, HandlerArgs, InvocationContext};
use super::loader::Loader;
use super::normalize::normalize;
use crate::config::ShimConfig;
use crate::env::Environment;
use crate::ids::InvocationId;
use crate::request::{header_map, RequestInit, RequestInput, TestRequest};
use crate::response::Response;
use crate::router::{params_to_map, strip_query, RouteTable};
use http::Method;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Resolves paths against a route table and drives the matched handler.
///
/// Holds no per-call state: every [`Dispatcher::invoke`] is independent, and
/// clones share the same table, loader and environment.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
    loader: Arc<dyn Loader>,
    env: Environment,
    base_url: String,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.table.len())
            .field("env", &self.env)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher with the default base URL.
    #[must_use]
    pub fn new(table: RouteTable, loader: Arc<dyn Loader>, env: Environment) -> Self {
        Self {
            table: Arc::new(table),
            loader,
            env,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build a dispatcher from configuration, resolving the route source once.
    pub fn from_config(
        config: &ShimConfig,
        loader: Arc<dyn Loader>,
        env: Environment,
    ) -> anyhow::Result<Self> {
        let table = RouteTable::from_source(&config.route_source())?;
        Ok(Self::new(table, loader, env).with_base_url(&config.base_url)?)
    }

    /// Replace the base URL that plain-path requests are resolved against.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, DispatchError> {
        Url::parse(base_url).map_err(|source| DispatchError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch one request and return the normalized response.
    ///
    /// # Flow
    ///
    /// 1. Pick the method: a [`TestRequest`] keeps its own; a plain path uses
    ///    `init.method`, defaulting to GET
    /// 2. Strip the query string and resolve the path against the table
    /// 3. Load the route's module and select the read or write handler
    /// 4. Merge path params with `init.params` (explicit values win)
    /// 5. Build the request and the invocation context, call the handler
    /// 6. Normalize whatever the handler returned
    ///
    /// # Errors
    ///
    /// * [`DispatchError::RouteNotFound`] - no route matches; lists every known path
    /// * [`DispatchError::ModuleLoad`] - the loader failed for the matched reference
    /// * [`DispatchError::HandlerNotFound`] - the module lacks the needed capability
    /// * [`DispatchError::Handler`] - the handler's own error, unchanged
    pub async fn invoke(
        &self,
        input: impl Into<RequestInput>,
        init: RequestInit,
    ) -> Result<Response, DispatchError> {
        let input = input.into();
        let invocation_id = InvocationId::new();
        let RequestInit {
            method: init_method,
            headers,
            body,
            params: explicit_params,
        } = init;

        let (method, path) = match &input {
            RequestInput::Path(raw) => (
                init_method.unwrap_or(Method::GET),
                strip_query(raw).to_string(),
            ),
            RequestInput::Request(req) => (req.method.clone(), req.path().to_string()),
        };

        // D1: Route resolution
        let route = self
            .table
            .resolve(&path)
            .ok_or_else(|| DispatchError::RouteNotFound {
                path: path.clone(),
                known: self.table.canonical_paths(),
            })?;

        // D2: Module load
        debug!(
            invocation_id = %invocation_id,
            handler_ref = %route.handler_ref,
            "Loading handler module"
        );
        let module = self
            .loader
            .load(&route.handler_ref)
            .await
            .map_err(|source| DispatchError::ModuleLoad {
                handler_ref: route.handler_ref.to_string(),
                source,
            })?;

        // D3: Handler selection
        let capability = Capability::for_method(&method);
        let handler = match module.select(&method) {
            Some(handler) => Arc::clone(handler),
            None => {
                debug!(
                    invocation_id = %invocation_id,
                    method = %method,
                    path = %path,
                    required = %capability,
                    available = ?module.capabilities(),
                    "Handler capability missing"
                );
                return Err(DispatchError::HandlerNotFound {
                    method,
                    path,
                    handler_ref: route.handler_ref.to_string(),
                    required: capability,
                    available: module.capabilities(),
                });
            }
        };

        let mut params = params_to_map(&route.params(&path));
        params.extend(explicit_params);

        let request = self.build_request(input, method, &headers, body)?;
        let args = HandlerArgs {
            request,
            params,
            context: InvocationContext {
                env: self.env.clone(),
                execution: ExecutionContext { invocation_id },
            },
        };

        // D4: Handler execution
        info!(
            invocation_id = %invocation_id,
            handler_ref = %route.handler_ref,
            route_pattern = %route.canonical_path,
            method = %args.request.method,
            path = %path,
            capability = %capability,
            "Request dispatched to handler"
        );
        let start = Instant::now();
        let output = handler.call(args).await.map_err(DispatchError::Handler)?;

        let response = normalize(output)?;
        info!(
            invocation_id = %invocation_id,
            handler_ref = %route.handler_ref,
            status = response.status,
            latency_us = start.elapsed().as_micros() as u64,
            "Handler response received"
        );
        Ok(response)
    }

    fn build_request(
        &self,
        input: RequestInput,
        method: Method,
        headers: &[(String, String)],
        body: Option<Vec<u8>>,
    ) -> Result<TestRequest, DispatchError> {
        let to_headers = |pairs: &[(String, String)]| {
            header_map(pairs).map_err(|name| DispatchError::InvalidHeader { name })
        };

        match input {
            RequestInput::Path(raw) => {
                let raw = if raw.starts_with('/') {
                    raw
                } else {
                    format!("/{raw}")
                };
                let url = format!("{}{}", self.base_url, raw);
                let url = Url::parse(&url)
                    .map_err(|source| DispatchError::InvalidUrl { url, source })?;
                Ok(TestRequest {
                    method,
                    url,
                    headers: to_headers(headers)?,
                    body,
                })
            }
            RequestInput::Request(mut req) => {
                req.method = method;
                // Init headers replace the request's header set, as with `new Request(req, init)`.
                if !headers.is_empty() {
                    req.headers = to_headers(headers)?;
                }
                if body.is_some() {
                    req.body = body;
                }
                Ok(req)
            }
        }
    }

    /// GET shorthand for [`Dispatcher::invoke`].
    pub async fn get(
        &self,
        input: impl Into<RequestInput>,
        init: RequestInit,
    ) -> Result<Response, DispatchError> {
        self.invoke(input, init.method(Method::GET)).await
    }

    /// HEAD shorthand for [`Dispatcher::invoke`].
    pub async fn head(
        &self,
        input: impl Into<RequestInput>,
        init: RequestInit,
    ) -> Result<Response, DispatchError> {
        self.invoke(input, init.method(Method::HEAD)).await
    }

    /// POST shorthand for [`Dispatcher::invoke`].
    pub async fn post(
        &self,
        input: impl Into<RequestInput>,
        init: RequestInit,
    ) -> Result<Response, DispatchError> {
        self.invoke(input, init.method(Method::POST)).await
    }

    /// PUT shorthand for [`Dispatcher::invoke`].
    pub async fn put(
        &self,
        input: impl Into<RequestInput>,
        init: RequestInit,
    ) -> Result<Response, DispatchError> {
        self.invoke(input, init.method(Method::PUT)).await
    }

    /// PATCH shorthand for [`Dispatcher::invoke`].
    pub async fn patch(
        &self,
        input: impl Into<RequestInput>,
        init: RequestInit,
    ) -> Result<Response, DispatchError> {
        self.invoke(input, init.method(Method::PATCH)).await
    }

    /// DELETE shorthand for [`Dispatcher::invoke`].
    pub async fn delete(
        &self,
        input: impl Into<RequestInput>,
        init: RequestInit,
    ) -> Result<Response, DispatchError> {
        self.invoke(input, init.method(Method::DELETE)).await
    }

    /// OPTIONS shorthand for [`Dispatcher::invoke`].
    pub async fn options(
        &self,
        input: impl Into<RequestInput>,
        init: RequestInit,
    ) -> Result<Response, DispatchError> {
        self.invoke(input, init.method(Method::OPTIONS)).await
    }
}
