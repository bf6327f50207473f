//! Configuration loading and validation.
//!
//! Sources are layered, lowest precedence first:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. `config.toml` in the platform configuration directory, if it exists.
//! 3. A file given explicitly (`--config`), as TOML, YAML or JSON depending
//!    on its extension.
//! 4. Environment variables prefixed with `DEVBYTE_`, with `__` separating
//!    nested keys (`DEVBYTE_NETWORK__TIMEOUT_SECS=5`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "DEVBYTE_";
pub const DEFAULT_PLAYLIST_URL: &str = "https://android-kotlin-fun-mars-server.appspot.com/devbytes";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding `videos.db`. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Delete cached videos missing from a freshly fetched playlist.
    pub prune_stale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub playlist_url: String,
    pub timeout_secs: u64,
}
impl Default for NetworkConfig {
    fn default() -> Self {
        Self { playlist_url: DEFAULT_PLAYLIST_URL.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}
impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "example", "devbyte")
}

impl Config {
    /// Load, merge and validate every configuration source.
    ///
    /// `explicit` must point at an existing file; the platform config file
    /// is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user = project_dirs().map(|dirs| dirs.config_dir().join("config.toml"));
        Self::load_layered(user.as_deref(), explicit)
    }

    fn load_layered(user: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit
            && !path.is_file()
        {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let config: Config = Self::layered(user, explicit).extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn layered(user: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = user {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validate(&self) -> Result<()> {
        if self.network.playlist_url.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("network.playlist_url must not be empty"));
        }
        if self.network.timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("network.timeout_secs must be greater than zero"));
        }
        if self.cache.data_dir.as_ref().is_some_and(|dir| dir.as_os_str().is_empty()) {
            exn::bail!(ErrorKind::Invalid("cache.data_dir must not be empty"));
        }
        Ok(())
    }

    /// Directory holding the cache database.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.cache.data_dir {
            return Ok(dir.clone());
        }
        project_dirs().map(|dirs| dirs.data_dir().to_path_buf()).ok_or_raise(|| ErrorKind::NoDataDir)
    }
}
