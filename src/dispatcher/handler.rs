use super::normalize::HandlerOutput;
use crate::env::Environment;
use crate::ids::InvocationId;
use crate::request::TestRequest;
use async_trait::async_trait;
use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// The two handler capabilities a module may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Serves safe methods (GET, HEAD)
    Read,
    /// Serves every other method
    Write,
}

impl Capability {
    /// GET and HEAD select [`Capability::Read`]; any other method, including
    /// extension methods, selects [`Capability::Write`].
    #[must_use]
    pub fn for_method(method: &Method) -> Self {
        if *method == Method::GET || *method == Method::HEAD {
            Capability::Read
        } else {
            Capability::Write
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Read => "read-handler",
            Capability::Write => "write-handler",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder for host execution-context facilities; carries the id of the
/// invocation it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    pub invocation_id: InvocationId,
}

/// Everything besides the request and params that a handler receives.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// The process-wide environment bundle, passed through unmodified
    pub env: Environment,
    pub execution: ExecutionContext,
}

/// Argument bundle for a single handler call.
#[derive(Debug, Clone)]
pub struct HandlerArgs {
    pub request: TestRequest,
    /// Path parameters merged with explicit caller parameters
    pub params: HashMap<String, String>,
    pub context: InvocationContext,
}

impl HandlerArgs {
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn env(&self) -> &Environment {
        &self.context.env
    }
}

/// A read or write handler.
///
/// Errors are returned to the caller of `invoke` unchanged. Any async closure
/// `Fn(HandlerArgs) -> impl Future<Output = anyhow::Result<HandlerOutput>>`
/// implements this trait.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, args: HandlerArgs) -> anyhow::Result<HandlerOutput>;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(HandlerArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<HandlerOutput>> + Send + 'static,
{
    async fn call(&self, args: HandlerArgs) -> anyhow::Result<HandlerOutput> {
        (self)(args).await
    }
}

pub type SharedHandler = Arc<dyn Handler>;

/// A loaded handler module, tagged by the capabilities it exposes.
#[derive(Clone, Default)]
pub enum HandlerModule {
    /// Exposes nothing; every request to it fails with `HandlerNotFound`
    #[default]
    None,
    ReadOnly(SharedHandler),
    WriteOnly(SharedHandler),
    /// `(read, write)`
    Both(SharedHandler, SharedHandler),
}

impl HandlerModule {
    #[must_use]
    pub fn read(handler: impl Handler + 'static) -> Self {
        HandlerModule::ReadOnly(Arc::new(handler))
    }

    #[must_use]
    pub fn write(handler: impl Handler + 'static) -> Self {
        HandlerModule::WriteOnly(Arc::new(handler))
    }

    #[must_use]
    pub fn both(read: impl Handler + 'static, write: impl Handler + 'static) -> Self {
        HandlerModule::Both(Arc::new(read), Arc::new(write))
    }

    /// Add or replace the read handler.
    #[must_use]
    pub fn with_read(self, handler: impl Handler + 'static) -> Self {
        let read: SharedHandler = Arc::new(handler);
        match self {
            HandlerModule::None | HandlerModule::ReadOnly(_) => HandlerModule::ReadOnly(read),
            HandlerModule::WriteOnly(write) | HandlerModule::Both(_, write) => {
                HandlerModule::Both(read, write)
            }
        }
    }

    /// Add or replace the write handler.
    #[must_use]
    pub fn with_write(self, handler: impl Handler + 'static) -> Self {
        let write: SharedHandler = Arc::new(handler);
        match self {
            HandlerModule::None | HandlerModule::WriteOnly(_) => HandlerModule::WriteOnly(write),
            HandlerModule::ReadOnly(read) | HandlerModule::Both(read, _) => {
                HandlerModule::Both(read, write)
            }
        }
    }

    /// The handler for `capability`, if the module has one.
    #[must_use]
    pub fn get(&self, capability: Capability) -> Option<&SharedHandler> {
        match (self, capability) {
            (HandlerModule::ReadOnly(h), Capability::Read)
            | (HandlerModule::WriteOnly(h), Capability::Write)
            | (HandlerModule::Both(h, _), Capability::Read)
            | (HandlerModule::Both(_, h), Capability::Write) => Some(h),
            _ => None,
        }
    }

    /// The handler `method` dispatches to: read for GET/HEAD, write otherwise.
    #[must_use]
    pub fn select(&self, method: &Method) -> Option<&SharedHandler> {
        self.get(Capability::for_method(method))
    }

    /// Capabilities present on the module, read before write.
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        match self {
            HandlerModule::None => Vec::new(),
            HandlerModule::ReadOnly(_) => vec![Capability::Read],
            HandlerModule::WriteOnly(_) => vec![Capability::Write],
            HandlerModule::Both(_, _) => vec![Capability::Read, Capability::Write],
        }
    }
}

impl fmt::Debug for HandlerModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerModule")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
