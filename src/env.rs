//! # Environment Module
//!
//! The environment is the opaque bundle of bindings (databases, storage clients,
//! feature flags) that the host test process hands to every handler. The dispatcher
//! never looks inside it; it is cloned into each [`InvocationContext`] unmodified.
//!
//! ## Lifecycle
//!
//! Build one [`Environment`] at test-process startup, pass it to the
//! [`Dispatcher`](crate::dispatcher::Dispatcher), and drop it at the end. It is
//! read-only once built, so clones are shared freely between invocations.
//!
//! ```rust
//! use routeshim::env::Environment;
//!
//! let env = Environment::builder()
//!     .bind("API_TOKEN", String::from("secret"))
//!     .build();
//!
//! let token = env.get::<String>("API_TOKEN").unwrap();
//! assert_eq!(token.as_str(), "secret");
//! ```
//!
//! [`InvocationContext`]: crate::dispatcher::InvocationContext

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Binding = Arc<dyn Any + Send + Sync>;

/// Read-only, cheaply clonable bundle of named bindings.
#[derive(Clone, Default)]
pub struct Environment {
    bindings: Arc<HashMap<String, Binding>>,
}

impl Environment {
    /// An environment with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// Look up a binding by name and type.
    ///
    /// Returns `None` when the name is unknown or the stored value is not a `T`.
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        let binding = self.bindings.get(name)?;
        Arc::clone(binding).downcast::<T>().ok()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Binding names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.names())
            .finish()
    }
}

/// Collects bindings before the environment is frozen.
#[derive(Default)]
pub struct EnvironmentBuilder {
    bindings: HashMap<String, Binding>,
}

impl EnvironmentBuilder {
    /// Add (or replace) a named binding.
    #[must_use]
    pub fn bind<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.bindings.insert(name.into(), Arc::new(value));
        self
    }

    #[must_use]
    pub fn build(self) -> Environment {
        Environment {
            bindings: Arc::new(self.bindings),
        }
    }
}
