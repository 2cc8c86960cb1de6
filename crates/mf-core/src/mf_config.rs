//! File-backed remote registry (`mf.config.json`)
//!
//! The file holds `{ "remotes": { "<name>": "<remote entry url>" } }`. Every
//! operation loads the whole file, mutates it in memory and rewrites it; a
//! failed operation never touches the file. Key order and unknown top-level
//! keys survive a rewrite.

use crate::model::RemoteRecord;
use crate::validate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Registry file name, looked up in the current directory
pub const CONFIG_FILE: &str = "mf.config.json";

/// Environment variable overriding the registry file path
pub const CONFIG_ENV: &str = "MF_CONFIG";

/// URL used by `add` when none is given
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:3001/remoteEntry.js";

#[derive(Debug, Error)]
pub enum RegistryFileError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Remote already exists: {0}")]
    AlreadyExists(String),

    #[error("Remote not found: {0}")]
    NotFoundRemote(String),

    #[error("Target name already exists: {0}")]
    TargetExists(String),

    #[error("Invalid remote name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// In-memory view of the registry file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// name → remote entry URL, in file order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub remotes: Map<String, Value>,

    /// Any other top-level keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `"remotes": null` reads as an empty registry
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RegistryFile {
    /// Registry written at scaffold time: one entry per remote
    pub fn from_remotes(remotes: &[RemoteRecord]) -> Self {
        Self {
            remotes: remotes
                .iter()
                .map(|r| (r.name.clone(), Value::String(r.remote_entry_url())))
                .collect(),
            extra: Map::new(),
        }
    }

    /// Resolve the registry path: `MF_CONFIG`, else `./mf.config.json`
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(CONFIG_FILE)
            })
    }

    pub fn load(path: &Path) -> Result<Self, RegistryFileError> {
        if !path.exists() {
            return Err(RegistryFileError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| RegistryFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RegistryFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Pretty JSON, two-space indent, trailing newline
    pub fn to_json_string(&self) -> String {
        let mut out = serde_json::to_string_pretty(self).unwrap_or_default();
        out.push('\n');
        out
    }

    pub fn save(&self, path: &Path) -> Result<(), RegistryFileError> {
        std::fs::write(path, self.to_json_string()).map_err(|source| RegistryFileError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Entries as `(name, url)`; non-string values are shown as raw JSON
    pub fn entries(&self) -> Vec<(String, String)> {
        self.remotes
            .iter()
            .map(|(name, url)| {
                let url = match url {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), url)
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.remotes.get(name)
    }

    fn check_name(name: &str) -> Result<(), RegistryFileError> {
        validate::validate_remote_name(name).map_err(|reason| RegistryFileError::InvalidName {
            name: name.to_string(),
            reason,
        })
    }

    fn check_url(url: &str) -> Result<(), RegistryFileError> {
        validate::validate_url(url).map_err(|reason| RegistryFileError::InvalidUrl {
            url: url.to_string(),
            reason,
        })
    }

    fn require(&self, name: &str) -> Result<(), RegistryFileError> {
        if self.remotes.contains_key(name) {
            Ok(())
        } else {
            Err(RegistryFileError::NotFoundRemote(name.to_string()))
        }
    }

    /// Append `name → url`; fails if the name is present
    pub fn add(&mut self, name: &str, url: &str) -> Result<(), RegistryFileError> {
        Self::check_name(name)?;
        Self::check_url(url)?;
        if self.remotes.contains_key(name) {
            return Err(RegistryFileError::AlreadyExists(name.to_string()));
        }
        self.remotes
            .insert(name.to_string(), Value::String(url.to_string()));
        Ok(())
    }

    /// Remove `name`, returning its URL; other entries keep their order
    pub fn remove(&mut self, name: &str) -> Result<Value, RegistryFileError> {
        self.remotes
            .shift_remove(name)
            .ok_or_else(|| RegistryFileError::NotFoundRemote(name.to_string()))
    }

    /// Rename `old` to `new`, keeping its URL and position
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), RegistryFileError> {
        self.require(old)?;
        Self::check_name(new)?;
        if self.remotes.contains_key(new) {
            return Err(RegistryFileError::TargetExists(new.to_string()));
        }
        let remotes = std::mem::take(&mut self.remotes);
        self.remotes = remotes
            .into_iter()
            .map(|(name, url)| {
                if name == old {
                    (new.to_string(), url)
                } else {
                    (name, url)
                }
            })
            .collect();
        Ok(())
    }

    /// Point `name` at a new URL
    pub fn set_url(&mut self, name: &str, url: &str) -> Result<(), RegistryFileError> {
        self.require(name)?;
        Self::check_url(url)?;
        self.remotes
            .insert(name.to_string(), Value::String(url.to_string()));
        Ok(())
    }
}

/// Load, apply `op`, and rewrite the file only if `op` succeeded
pub fn update<T>(
    path: &Path,
    op: impl FnOnce(&mut RegistryFile) -> Result<T, RegistryFileError>,
) -> Result<T, RegistryFileError> {
    let mut registry = RegistryFile::load(path)?;
    let result = op(&mut registry)?;
    registry.save(path)?;
    Ok(result)
}
