//! # Configuration
//!
//! aide configuration is loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `AIDE_DATA_DIR`, `AIDE_LOG_LEVEL`.
//! 2. **Config file**: `aide.toml` in the OS config directory (via `directories`),
//!    e.g. `~/.config/aide/aide.toml` on Linux. A missing file is fine.
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! The CLI `--data <dir>` flag beats all of them for the data directory.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where store files and logs live |
//! | `log_level` | `info` | `trace`, `debug`, `info`, `warn` or `error` |
//! | `contacts_file` | `contacts.json` | Address book file, inside `data_dir` |
//! | `notes_file` | `notes.json` | Notebook file, inside `data_dir` |

use crate::error::{AideError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "aide.toml";

/// Configuration for aide, stored in `aide.toml`.
#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AideConfig {
    /// Directory holding the store files and the `logs/` folder.
    /// When unset, the OS data directory for aide is used.
    #[config(env = "AIDE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level for the files under `<data_dir>/logs`.
    #[config(default = "info", env = "AIDE_LOG_LEVEL")]
    pub log_level: String,

    /// File name of the address book, relative to `data_dir`.
    #[config(default = "contacts.json")]
    pub contacts_file: String,

    /// File name of the notebook, relative to `data_dir`.
    #[config(default = "notes.json")]
    pub notes_file: String,
}

impl Default for AideConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
            contacts_file: "contacts.json".to_string(),
            notes_file: "notes.json".to_string(),
        }
    }
}

impl AideConfig {
    /// Loads env, then the user's `aide.toml` (if any), then defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_file().as_deref())
    }

    /// Like [`AideConfig::load`] with an explicit config file.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        let config = builder
            .load()
            .map_err(|e| AideError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// A commented sample `aide.toml`.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("contacts_file", &self.contacts_file),
            ("notes_file", &self.notes_file),
        ] {
            let path = Path::new(value);
            if value.trim().is_empty() || path.components().count() != 1 || path.is_absolute() {
                return Err(AideError::Config(format!(
                    "{} must be a plain file name, got '{}'",
                    key, value
                )));
            }
        }
        if self.contacts_file == self.notes_file {
            return Err(AideError::Config(
                "contacts_file and notes_file must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// `aide.toml` in the OS config directory, if the platform has one.
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "aide").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
