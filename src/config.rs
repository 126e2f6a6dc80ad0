//! Configuration for lendlib paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LENDLIB_HOME, LENDLIB_CATALOG)
//! 2. Config file (.lendlib/config.yaml)
//! 3. Defaults (~/.lendlib/catalog.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .lendlib/config.yaml
//! - `home` is relative to the .lendlib/ directory, `catalog` to its parent

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

pub mod paths;

/// Environment variable overriding the home directory
pub const ENV_HOME: &str = "LENDLIB_HOME";

/// Environment variable overriding the catalog file
pub const ENV_CATALOG: &str = "LENDLIB_CATALOG";

const CONFIG_DIR: &str = ".lendlib";
const CONFIG_FILE: &str = "config.yaml";
const CATALOG_FILE: &str = "catalog.json";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .lendlib/)
    pub home: Option<String>,
    /// Catalog JSON file (relative to the project root)
    pub catalog: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// lendlib home directory
    pub home: PathBuf,
    /// Catalog JSON file
    pub catalog: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Values read from the environment
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    home: Option<String>,
    catalog: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var(ENV_HOME).ok(),
            catalog: std::env::var(ENV_CATALOG).ok(),
        }
    }
}

/// Find config file by searching a directory and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine the config file, environment and defaults
fn resolve_config(
    config: Option<(PathBuf, ConfigFile)>,
    env: EnvOverrides,
    default_home: PathBuf,
) -> ResolvedConfig {
    let (config_file, paths) = match config {
        Some((path, file)) => (Some(path), file.paths),
        None => (None, PathsConfig::default()),
    };

    // .lendlib/ and the project root containing it
    let config_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(Path::new("."));
    let base_dir = config_dir.parent().unwrap_or(Path::new("."));

    let home = if let Some(env_home) = env.home {
        PathBuf::from(env_home)
    } else if let Some(ref home_path) = paths.home {
        resolve_path(config_dir, home_path)
    } else {
        default_home
    };

    let catalog = if let Some(env_catalog) = env.catalog {
        PathBuf::from(env_catalog)
    } else if let Some(ref catalog_path) = paths.catalog {
        resolve_path(base_dir, catalog_path)
    } else {
        home.join(CATALOG_FILE)
    };

    ResolvedConfig {
        home,
        catalog,
        config_file,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config = match find_config_file(&cwd) {
        Some(path) => {
            let file = load_config_file(&path)?;
            Some((path, file))
        }
        None => None,
    };

    Ok(resolve_config(config, EnvOverrides::from_env(), default_home))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
