use super::handler::Capability;
use http::Method;

/// Failure reported by a [`Loader`](super::Loader).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The loader has nothing registered under the reference
    #[error("no module registered under `{0}`")]
    NotRegistered(String),
    /// Any other loader-specific failure
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn capability_list(caps: &[Capability]) -> String {
    caps.iter()
        .map(Capability::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a dispatch could not produce a response.
///
/// Every variant is surfaced to the caller as-is; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No table node matches the normalized path
    #[error("no route matches `{path}`; known routes: [{}]", .known.join(", "))]
    RouteNotFound {
        path: String,
        /// Every canonical path in the table, sorted ascending
        known: Vec<String>,
    },
    /// The loader failed for a resolved handler reference
    #[error("failed to load handler module `{handler_ref}`: {source}")]
    ModuleLoad {
        handler_ref: String,
        #[source]
        source: LoadError,
    },
    /// The module lacks the capability the method requires
    #[error(
        "module `{handler_ref}` has no {required} for {method} {path}; it provides [{}]",
        capability_list(.available)
    )]
    HandlerNotFound {
        method: Method,
        path: String,
        handler_ref: String,
        required: Capability,
        available: Vec<Capability>,
    },
    /// The handler itself failed; the original error is kept untouched
    #[error(transparent)]
    Handler(anyhow::Error),
    #[error("invalid request url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },
    #[error("failed to serialize response body: {0}")]
    Body(#[from] serde_json::Error),
}

impl DispatchError {
    /// The handler's own error, when dispatch failed inside the handler.
    #[must_use]
    pub fn into_handler_error(self) -> Option<anyhow::Error> {
        match self {
            DispatchError::Handler(err) => Some(err),
            _ => None,
        }
    }
}
