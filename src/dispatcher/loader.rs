use super::error::LoadError;
use super::handler::HandlerModule;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{info, warn};

/// Turns an opaque handler reference into a loaded [`HandlerModule`].
///
/// The dispatcher calls this once per invocation. Caching, if any, is the
/// loader's business.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, handler_ref: &str) -> Result<HandlerModule, LoadError>;
}

/// In-memory loader keyed by handler reference.
#[derive(Clone, Default, Debug)]
pub struct ModuleRegistry {
    modules: HashMap<String, HandlerModule>,
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under `handler_ref`.
    ///
    /// **IMPORTANT**: an existing module with the same reference is replaced.
    pub fn register(&mut self, handler_ref: impl Into<String>, module: HandlerModule) {
        let handler_ref = handler_ref.into();
        if self.modules.contains_key(&handler_ref) {
            warn!(
                handler_ref = %handler_ref,
                total_modules = self.modules.len(),
                "Replaced existing handler module"
            );
        }

        info!(
            handler_ref = %handler_ref,
            capabilities = ?module.capabilities(),
            "Handler module registered"
        );
        self.modules.insert(handler_ref, module);
    }

    /// Builder-style [`ModuleRegistry::register`].
    #[must_use]
    pub fn with(mut self, handler_ref: impl Into<String>, module: HandlerModule) -> Self {
        self.register(handler_ref, module);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Registered references, sorted.
    #[must_use]
    pub fn refs(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        refs.sort_unstable();
        refs
    }
}

#[async_trait]
impl Loader for ModuleRegistry {
    async fn load(&self, handler_ref: &str) -> Result<HandlerModule, LoadError> {
        self.modules
            .get(handler_ref)
            .cloned()
            .ok_or_else(|| LoadError::NotRegistered(handler_ref.to_string()))
    }
}
