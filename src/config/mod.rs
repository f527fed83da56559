//
//  apigee-mint
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the `mint` configuration file, a TOML document stored in
//! the platform configuration directory.
//!
//! ## Overview
//!
//! - **Core Configuration**: default organization and request timeout
//! - **Cache Configuration**: which cache store backs list reads, and its TTL
//! - **Organization Configuration**: per-organization endpoint and user
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/mint/config.toml`
//! - **macOS**: `~/Library/Application Support/mint/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\mint\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! default_org = "myorg"
//! timeout_secs = 30
//!
//! [cache]
//! backend = "file"
//! ttl_secs = 300
//!
//! [orgs.myorg]
//! endpoint = "https://api.enterprise.apigee.com/v1"
//! user = "me@example.com"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use apigee_mint::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("default_org", "myorg".to_string())?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`orgs`]: Organization defaults and endpoint normalization

mod file;
mod orgs;

pub use file::*;
pub use orgs::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["default_org", "timeout_secs", "cache.backend", "cache.ttl_secs"];

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Per-organization settings keyed by organization name.
    #[serde(default)]
    pub orgs: BTreeMap<String, OrgConfig>,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    /// Organization used when `--org`/`MINT_ORG` is not given.
    #[serde(default)]
    pub default_org: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_org: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which cache store backs list reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process only; lost when the command exits
    #[default]
    Memory,
    /// One JSON file per key in the user cache directory
    File,
    /// Caching disabled
    None,
}

impl std::str::FromStr for CacheBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "none" | "off" | "disabled" => Ok(Self::None),
            other => bail!("Unknown cache backend '{}': expected memory, file or none", other),
        }
    }
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::None => "none",
        })
    }
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Entries older than this are treated as missing. Unset means no expiry.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

/// Settings for one organization.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrgConfig {
    /// Management API base URL
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Organization user (password lives in the keyring)
    #[serde(default)]
    pub user: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory holding the file cache.
    pub fn cache_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.cache_dir().to_path_buf())
    }

    /// File cache directory of one organization, directly under [`cache_dir`](Self::cache_dir).
    pub fn org_cache_dir(org: &str) -> Result<PathBuf> {
        Ok(Self::cache_dir()?.join(org_dir_name(org)))
    }

    pub fn org_config(&self, org: &str) -> Option<&OrgConfig> {
        self.orgs.get(org)
    }

    /// Returns the settings for `org`, creating an empty entry if needed.
    pub fn org_config_mut(&mut self, org: &str) -> &mut OrgConfig {
        self.orgs.entry(org.to_string()).or_default()
    }

    /// Reads a value by key. See [`CONFIG_KEYS`].
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_org" => self.core.default_org.clone(),
            "timeout_secs" => Some(self.core.timeout_secs.to_string()),
            "cache.backend" => Some(self.cache.backend.to_string()),
            "cache.ttl_secs" => self.cache.ttl_secs.map(|t| t.to_string()),
            _ => None,
        }
    }

    /// Sets a value by key.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values that do not parse.
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "default_org" => self.core.default_org = Some(value),
            "timeout_secs" => self.core.timeout_secs = parse_number(key, &value)?,
            "cache.backend" => self.cache.backend = value.parse()?,
            "cache.ttl_secs" => {
                self.cache.ttl_secs = if value.is_empty() || value == "0" {
                    None
                } else {
                    Some(parse_number(key, &value)?)
                }
            }
            _ => bail!("Unknown config key '{}'. Valid keys: {}", key, CONFIG_KEYS.join(", ")),
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' must be a whole number of seconds, got '{}'", key, value))
}

/// Escapes an organization name into a single path component.
///
/// Dots are escaped too, so `.` and `..` cannot name a parent directory.
fn org_dir_name(org: &str) -> String {
    crate::cache::file_stem(org).replace('.', "%2E")
}
