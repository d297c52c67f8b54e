//! Operator configuration.
//!
//! # Responsibility
//! - Resolve file locations, logging settings and the admin password.
//!
//! # Invariants
//! - Precedence is defaults, then `folio.toml`, then `FOLIO_*` variables;
//!   command-line flags are applied by the caller last.
//! - A missing config file is not an error; a malformed one is.

use crate::auth::DEFAULT_ADMIN_PASSWORD;
use crate::logging::default_log_level;
use crate::store::DEFAULT_BUNDLE_PATH;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";
const DEFAULT_STORAGE_PATH: &str = ".folio/local-storage.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    /// Bundled default document.
    pub bundle_path: PathBuf,
    /// SQLite file standing in for browser local storage.
    pub storage_path: PathBuf,
    /// Directory receiving `portfolio-data.json` on export.
    pub export_dir: PathBuf,
    /// Rolling log directory; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    pub admin_password: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            bundle_path: PathBuf::from(DEFAULT_BUNDLE_PATH),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            export_dir: PathBuf::from("."),
            log_dir: None,
            log_level: default_log_level().to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl FolioConfig {
    /// Loads `path`, or `folio.toml` in the working directory when `None`.
    ///
    /// An explicitly named file must exist; the implicit default may not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(raw) => Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse { path, source }),
            Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Applies `FOLIO_*` overrides read through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("FOLIO_BUNDLE_PATH") {
            self.bundle_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("FOLIO_STORAGE_PATH") {
            self.storage_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("FOLIO_EXPORT_DIR") {
            self.export_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("FOLIO_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("FOLIO_LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = lookup("FOLIO_ADMIN_PASSWORD") {
            self.admin_password = value;
        }
    }

    pub fn apply_process_env(&mut self) {
        self.apply_env_overrides(|key| std::env::var(key).ok());
    }
}
