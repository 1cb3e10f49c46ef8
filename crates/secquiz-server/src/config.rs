//! Configuration loading.
//!
//! Search order for the config file:
//! 1. an explicit `--config` path
//! 2. `secquiz.toml` in the current directory
//! 3. `~/.config/secquiz/config.toml`
//!
//! `${VAR}` references in string values are resolved from the environment,
//! and the `HOST` / `PORT` variables override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use secquiz_core::catalog::{load_catalog, ScenarioCatalog};
use secquiz_core::taxonomy::{load_taxonomy, Taxonomy};

/// Top-level secquiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecquizConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Scenario catalog file. Bundled scenarios when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Taxonomy file. Built-in taxonomy when unset.
    #[serde(default)]
    pub taxonomy: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for SecquizConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog: None,
            taxonomy: None,
        }
    }
}

impl SecquizConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the configured scenario catalog.
    pub fn load_catalog(&self) -> Result<ScenarioCatalog> {
        load_catalog(self.catalog.as_deref())
    }

    /// Load the configured taxonomy.
    pub fn load_taxonomy(&self) -> Result<Taxonomy> {
        load_taxonomy(self.taxonomy.as_deref())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
pub fn load_config() -> Result<SecquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SecquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("secquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<SecquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SecquizConfig::default(),
    };

    config.host = resolve_env_vars(&config.host);
    config.catalog = config.catalog.as_deref().map(resolve_path);
    config.taxonomy = config.taxonomy.as_deref().map(resolve_path);

    // Apply env var overrides
    if let Ok(host) = std::env::var("HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("PORT") {
        config.port = port
            .parse()
            .with_context(|| format!("invalid PORT value: {port}"))?;
    }

    tracing::debug!(
        path = ?config_path,
        bind = %config.bind_addr(),
        "loaded configuration"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("secquiz"))
}
