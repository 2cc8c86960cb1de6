//! Data model for a host + remotes topology

use crate::validate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Default dev-server port offered for a fresh remote
pub const DEFAULT_REMOTE_PORT: u16 = 3001;

/// Default dev-server port for the host
pub const DEFAULT_HOST_PORT: u16 = 3000;

/// Default component a remote exposes
pub const DEFAULT_EXPOSES: &str = "App";

/// Well-known artifact every remote serves
pub const REMOTE_ENTRY_FILE: &str = "remoteEntry.js";

/// The URL a remote is reached at when nothing else was entered
pub fn default_remote_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

/// Bundler the generated apps are wired for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Bundler {
    /// Webpack 5 with ModuleFederationPlugin
    #[default]
    Webpack,
    /// Vite with @module-federation/vite
    Vite,
}

impl Bundler {
    pub fn display_name(&self) -> &'static str {
        match self {
            Bundler::Webpack => "Webpack 5",
            Bundler::Vite => "Vite",
        }
    }

    /// File name of the bundler configuration in each app
    pub fn config_file(&self) -> &'static str {
        match self {
            Bundler::Webpack => "webpack.config.js",
            Bundler::Vite => "vite.config.js",
        }
    }
}

impl fmt::Display for Bundler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One micro-frontend remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Federation scope, workspace directory and import prefix
    pub name: String,
    pub port: u16,
    /// Base URL the remote is served from (without `/remoteEntry.js`)
    pub url: String,
    /// Component the remote exposes
    pub exposes: String,
}

impl RemoteRecord {
    /// Create a record whose URL is derived from its port
    pub fn new(name: impl Into<String>, port: u16, exposes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port,
            url: default_remote_url(port),
            exposes: exposes.into(),
        }
    }

    /// Full URL of the remote entry the host loads
    pub fn remote_entry_url(&self) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), REMOTE_ENTRY_FILE)
    }

    /// Local dev URL (always derived from the port, unlike `url`)
    pub fn dev_url(&self) -> String {
        default_remote_url(self.port)
    }

    /// Workspace directory relative to the project root
    pub fn app_dir(&self) -> String {
        format!("apps/{}", self.name)
    }

    /// Check every field against its validator
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| ConfigError::InvalidRemote {
            name: self.name.clone(),
            field,
            reason,
        };
        validate::validate_remote_name(&self.name).map_err(|r| invalid("name", r))?;
        validate::validate_port(&self.port.to_string()).map_err(|r| invalid("port", r))?;
        validate::validate_url(&self.url).map_err(|r| invalid("url", r))?;
        validate::validate_exposes(&self.exposes).map_err(|r| invalid("exposes", r))?;
        Ok(())
    }
}

/// Violations of the invariants a scaffoldable config must satisfy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid host port {port}: {reason}")]
    InvalidHostPort { port: u16, reason: String },

    #[error("Remote '{name}' has an invalid {field}: {reason}")]
    InvalidRemote {
        name: String,
        field: &'static str,
        reason: String,
    },

    #[error("Remote name '{name}' is used more than once (names are case-insensitive)")]
    DuplicateRemote { name: String },

    #[error("Remote name '{name}' is reserved for the host app")]
    ReservedName { name: String },
}

/// The finalized scaffolding input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project_name: String,
    pub host_port: u16,
    #[serde(default)]
    pub bundler: Bundler,
    /// Insertion order drives import and render order
    #[serde(default)]
    pub remotes: Vec<RemoteRecord>,
}

impl ProjectConfig {
    pub fn new(project_name: impl Into<String>, host_port: u16, remotes: Vec<RemoteRecord>) -> Self {
        Self {
            project_name: project_name.into(),
            host_port,
            bundler: Bundler::default(),
            remotes,
        }
    }

    pub fn with_bundler(mut self, bundler: Bundler) -> Self {
        self.bundler = bundler;
        self
    }

    /// Local dev URL of the host
    pub fn host_url(&self) -> String {
        default_remote_url(self.host_port)
    }

    /// Check the uniqueness and well-formedness invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate_project_name(&self.project_name).map_err(|reason| {
            ConfigError::InvalidProjectName {
                name: self.project_name.clone(),
                reason,
            }
        })?;
        validate::validate_port(&self.host_port.to_string()).map_err(|reason| {
            ConfigError::InvalidHostPort {
                port: self.host_port,
                reason,
            }
        })?;

        let mut seen = HashSet::new();
        for remote in &self.remotes {
            if validate::is_reserved_remote_name(&remote.name) {
                return Err(ConfigError::ReservedName {
                    name: remote.name.clone(),
                });
            }
            remote.validate()?;
            if !seen.insert(remote.name.to_lowercase()) {
                return Err(ConfigError::DuplicateRemote {
                    name: remote.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Ports bound by more than one app, with the apps sharing each.
    ///
    /// Port collisions are allowed; callers only surface them as warnings.
    pub fn port_conflicts(&self) -> Vec<(u16, Vec<String>)> {
        let mut owners: Vec<(u16, Vec<String>)> = vec![(self.host_port, vec!["host".to_string()])];
        for remote in &self.remotes {
            match owners.iter_mut().find(|(port, _)| *port == remote.port) {
                Some((_, apps)) => apps.push(remote.name.clone()),
                None => owners.push((remote.port, vec![remote.name.clone()])),
            }
        }
        owners.retain(|(_, apps)| apps.len() > 1);
        owners
    }
}
