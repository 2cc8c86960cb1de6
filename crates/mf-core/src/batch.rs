//! Non-interactive topology files for `create-mf-app --from`
//!
//! A topology file is YAML (or JSON, which YAML accepts) in the shape of
//! [`ProjectConfig`], with `url` and `exposes` optional per remote:
//!
//! ```yaml
//! projectName: shop
//! hostPort: 3000
//! bundler: vite
//! remotes:
//!   - name: checkout
//!     port: 3001
//!   - name: cart
//!     port: 3002
//!     exposes: Cart
//! ```

use crate::model::{
    default_remote_url, Bundler, ProjectConfig, RemoteRecord, DEFAULT_EXPOSES, DEFAULT_HOST_PORT,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TopologyFile {
    pub project_name: String,
    #[serde(default = "default_host_port")]
    pub host_port: u16,
    #[serde(default)]
    pub bundler: Bundler,
    #[serde(default)]
    pub remotes: Vec<RemoteSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSpec {
    pub name: String,
    pub port: u16,
    pub url: Option<String>,
    pub exposes: Option<String>,
}

fn default_host_port() -> u16 {
    DEFAULT_HOST_PORT
}

impl From<RemoteSpec> for RemoteRecord {
    fn from(spec: RemoteSpec) -> Self {
        RemoteRecord {
            url: spec.url.unwrap_or_else(|| default_remote_url(spec.port)),
            exposes: spec
                .exposes
                .map(|e| e.trim().to_string())
                .unwrap_or_else(|| DEFAULT_EXPOSES.to_string()),
            name: spec.name,
            port: spec.port,
        }
    }
}

impl TopologyFile {
    pub fn into_config(self) -> ProjectConfig {
        ProjectConfig::new(
            self.project_name,
            self.host_port,
            self.remotes.into_iter().map(RemoteRecord::from).collect(),
        )
        .with_bundler(self.bundler)
    }
}

/// Parse and validate a topology document
pub fn parse_topology(content: &str) -> Result<ProjectConfig> {
    let file: TopologyFile =
        serde_yaml::from_str(content).context("Failed to parse topology file")?;
    let config = file.into_config();
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate the topology file at `path`
pub async fn load_topology(path: &Path) -> Result<ProjectConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_topology(&content).with_context(|| format!("Invalid topology file {}", path.display()))
}
