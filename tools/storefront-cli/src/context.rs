//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::Storefront;
use tracing::debug;

use crate::config::StorefrontConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (StorefrontConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StorefrontConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the config file, or the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let candidate = PathBuf::from(path);
        if candidate.is_absolute() {
            return candidate;
        }
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(self.cwd.as_path());
        base.join(candidate)
    }

    /// Load the configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                debug!(path = %path.display(), "loading catalog file");
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Invalid catalog: {}", path.display()))
            }
            None => Catalog::builtin().context("Failed to load built-in catalog"),
        }
    }

    /// Open a session over the configured catalog.
    pub fn storefront(&self) -> Result<Storefront> {
        let catalog = self.catalog()?;
        self.output.debug(&format!("Loaded {} products", catalog.len()));
        Ok(Storefront::with_settings(Arc::new(catalog), self.config.settings()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: StorefrontConfig, config_path: Option<PathBuf>) -> Context {
        Context {
            config,
            config_path,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_builtin_catalog_without_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), StorefrontConfig::default(), None);
        assert_eq!(ctx.catalog().unwrap().len(), 10);
    }

    #[test]
    fn test_catalog_path_is_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("mini.json"),
            r#"{
                "currency": "CLP",
                "categories": [{"id": "caps", "name": "Caps"}],
                "products": [{"id": "c1", "name": "Cap", "sku": "CAP-1", "category": "caps", "basePrice": 3500, "stock": 40}]
            }"#,
        )
        .unwrap();

        let mut config = StorefrontConfig::default();
        config.catalog.path = Some("mini.json".to_string());
        let ctx = context_in(
            Path::new("/"),
            config,
            Some(dir.path().join("storefront.toml")),
        );

        let store = ctx.storefront().unwrap();
        assert_eq!(store.catalog().len(), 1);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("storefront.toml"), "[session]\nlow_stock_threshold = 3\n").unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.session.low_stock_threshold, 3);
        assert_eq!(path, dir.path().join("storefront.toml"));
    }

    #[test]
    fn test_missing_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::default();
        config.catalog.path = Some("nope.json".to_string());
        let ctx = context_in(dir.path(), config, None);
        assert!(ctx.catalog().is_err());
    }
}
