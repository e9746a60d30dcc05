//! Persisted client settings: the API key and the preferred display type.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LookupError;

/// Config file name, resolved against the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "INDIAN_DATA_SHOP_CONFIG";

/// Contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: String,
    /// Stored verbatim; see [`Config::display`] for how it is interpreted.
    #[serde(default)]
    pub display_type: String,
}

/// Output style selected by `display_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    Table,
    Plain,
}

impl Config {
    /// Build a config from raw user input. The key is trimmed and the display
    /// type is trimmed and upper-cased; neither is otherwise validated.
    pub fn from_input(api_key: &str, display_type: &str) -> Self {
        Config {
            api_key: api_key.trim().to_string(),
            display_type: display_type.trim().to_uppercase(),
        }
    }

    /// Only the exact string `PLAIN` selects plain output. Anything else,
    /// including lower-case `plain` or an empty value, means a table.
    pub fn display(&self) -> DisplayType {
        if self.display_type == "PLAIN" {
            DisplayType::Plain
        } else {
            DisplayType::Table
        }
    }
}

/// Read and decode the config file at `path`.
pub fn load(path: &Path) -> Result<Config, LookupError> {
    let data = fs::read_to_string(path).map_err(|source| LookupError::ConfigMissing {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: Config = serde_json::from_str(&data).map_err(|source| LookupError::ConfigMalformed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), display_type = %cfg.display_type, "loaded config");
    Ok(cfg)
}

/// Write `cfg` to `path` as 2-space indented JSON, readable only by the owner.
pub fn save(path: &Path, cfg: &Config) -> Result<(), LookupError> {
    let write_err = |source: io::Error| LookupError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut data = serde_json::to_string_pretty(cfg).map_err(|e| write_err(e.into()))?;
    data.push('\n');
    write_private(path, data.as_bytes()).map_err(write_err)?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(bytes)?;
    file.flush()
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}
