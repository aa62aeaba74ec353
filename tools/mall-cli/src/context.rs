//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use mall_engine::EngineClient;
use mall_search::{ProductSearchService, ProductSource};

use crate::config::{MallConfig, CONFIG_NAMES};
use crate::output::Output;
use crate::source::{JsonFileProductSource, MissingProductSource};

/// Service wired with the configured engine and product source.
pub type Service = ProductSearchService<EngineClient, Box<dyn ProductSource>>;

/// Execution context for CLI commands.
pub struct Context {
    pub config: MallConfig,
    /// File the config was loaded from, if any.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (MallConfig::load(path)?, Some(PathBuf::from(path))),
            None => match find_config(&cwd) {
                Some(path) => {
                    let config = MallConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (MallConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Build the search service from the loaded configuration.
    pub fn service(&self) -> Result<Service> {
        let client = EngineClient::new(self.config.engine_config())
            .context("Failed to create engine client")?;

        let source: Box<dyn ProductSource> = match self.config.source.products {
            Some(ref path) => Box::new(JsonFileProductSource::new(self.resolve_path(path))),
            None => Box::new(MissingProductSource),
        };

        Ok(ProductSearchService::new(client, source))
    }

    /// Resolve a path relative to the config file's directory, or the working
    /// directory when no file was loaded.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            return path;
        }
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(self.cwd.as_path());
        base.join(path)
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_upward() {
        let root = std::env::temp_dir().join(format!("mall-ctx-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".mall.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.join(".mall.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_resolve_path_relative_to_config() {
        let ctx = Context {
            config: MallConfig::default(),
            config_path: Some(PathBuf::from("/etc/mall/mall.toml")),
            output: Output::new(false, false),
            cwd: PathBuf::from("/home/user"),
        };
        assert_eq!(
            ctx.resolve_path("products.json"),
            PathBuf::from("/etc/mall/products.json")
        );
        assert_eq!(ctx.resolve_path("/data/p.json"), PathBuf::from("/data/p.json"));
    }
}
