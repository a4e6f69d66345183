//! Optional TOML configuration file

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// Contents of `config.toml`
///
/// ```toml
/// address = "https://tfe.example.com"
/// organization = "acme"
/// token = "..."
/// oauth_token_id = "ot-..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub address: Option<String>,
    pub organization: Option<String>,
    pub token: Option<String>,
    pub oauth_token_id: Option<String>,
}

impl FileConfig {
    /// Platform config location, e.g. `~/.config/tfsync/config.toml` on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tfsync").join("config.toml"))
    }

    /// Load a config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Load the explicitly requested file, or the default one if it exists
    ///
    /// An explicit path must exist; a missing default file yields an empty
    /// config.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}
