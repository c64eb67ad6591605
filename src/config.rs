//! # Configuration Module
//!
//! Setup-time configuration for a test suite: where the route table comes from,
//! which base URL plain paths are resolved against, and which environment binding
//! the seeding helper talks to.
//!
//! ## File format
//!
//! ```yaml
//! routes: routes.yaml          # a file path, or an inline list of routes
//! base_url: http://localhost:8787
//! db_binding: DB
//! log:
//!   level: debug
//!   format: pretty
//! ```
//!
//! ## Environment Variables
//!
//! - `ROUTESHIM_ROUTES`: route table file, replaces `routes`
//! - `ROUTESHIM_BASE_URL`: replaces `base_url`
//! - `ROUTESHIM_DB_BINDING`: replaces `db_binding`
//! - `ROUTESHIM_LOG_LEVEL` / `ROUTESHIM_LOG_FORMAT`: see [`crate::logging`]

use crate::dispatcher::DEFAULT_BASE_URL;
use crate::logging::LogConfig;
use crate::table::{RouteDef, RouteSource};
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Default name of the database binding used by [`crate::helpers::seed`].
pub const DEFAULT_DB_BINDING: &str = "DB";

/// `routes:` is either a file path or an inline table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RoutesConfig {
    File(PathBuf),
    Inline(Vec<RouteDef>),
}

impl Default for RoutesConfig {
    fn default() -> Self {
        RoutesConfig::Inline(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    pub routes: RoutesConfig,
    pub base_url: String,
    pub db_binding: String,
    pub log: LogConfig,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            routes: RoutesConfig::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            db_binding: DEFAULT_DB_BINDING.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl ShimConfig {
    /// Load a YAML config file.
    ///
    /// A relative `routes` path is taken relative to the config file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: ShimConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        if let RoutesConfig::File(routes) = &config.routes {
            if routes.is_relative() {
                if let Some(dir) = path.parent() {
                    config.routes = RoutesConfig::File(dir.join(routes));
                }
            }
        }
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply `ROUTESHIM_*` overrides from `lookup`.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(routes) = lookup("ROUTESHIM_ROUTES") {
            self.routes = RoutesConfig::File(PathBuf::from(routes));
        }
        if let Some(base_url) = lookup("ROUTESHIM_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(binding) = lookup("ROUTESHIM_DB_BINDING") {
            self.db_binding = binding;
        }
        self.log = self.log.with_overrides(&lookup);
        self
    }

    /// The configured route source.
    #[must_use]
    pub fn route_source(&self) -> RouteSource {
        match &self.routes {
            RoutesConfig::File(path) => RouteSource::File(path.clone()),
            RoutesConfig::Inline(defs) => RouteSource::Inline(defs.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShimConfig::default();
        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.db_binding, "DB");
        assert_eq!(config.routes, RoutesConfig::Inline(Vec::new()));
    }

    #[test]
    fn test_inline_routes_yaml() {
        let config: ShimConfig = serde_yaml::from_str(
            r#"
routes:
  - path: /health
    handler: health
base_url: http://127.0.0.1:9000
"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.db_binding, "DB");
        match config.routes {
            RoutesConfig::Inline(defs) => assert_eq!(defs[0].handler, "health"),
            other => panic!("expected inline routes, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides() {
        let config = ShimConfig::default().with_overrides(|key| match key {
            "ROUTESHIM_ROUTES" => Some("/tmp/routes.yaml".to_string()),
            "ROUTESHIM_BASE_URL" => Some("http://example.test".to_string()),
            "ROUTESHIM_DB_BINDING" => Some("MAIN_DB".to_string()),
            _ => None,
        });
        assert_eq!(config.routes, RoutesConfig::File(PathBuf::from("/tmp/routes.yaml")));
        assert_eq!(config.base_url, "http://example.test");
        assert_eq!(config.db_binding, "MAIN_DB");
    }

    #[test]
    fn test_relative_routes_path_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("shim.yaml");
        std::fs::write(&config_path, "routes: tables/routes.yaml\n").unwrap();

        let config = ShimConfig::from_file(&config_path).unwrap();
        assert_eq!(
            config.routes,
            RoutesConfig::File(dir.path().join("tables/routes.yaml"))
        );
    }
}
