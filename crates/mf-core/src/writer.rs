//! Materializes a rendered project on disk

use crate::model::{ConfigError, ProjectConfig};
use crate::render::{render_project, RenderedFile};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Directory {} already exists", .0.display())]
    TargetExists(PathBuf),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// What [`scaffold`] created
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    /// Relative paths in write order
    pub files: Vec<String>,
}

/// Target directory of `config` under `parent`
pub fn project_dir(parent: &Path, config: &ProjectConfig) -> PathBuf {
    parent.join(&config.project_name)
}

/// Render `config` and write it into `<parent>/<project_name>`.
///
/// The config is validated and the target checked before anything is
/// created; a failure there leaves the filesystem untouched. A failure after
/// writing started leaves the files written so far in place.
pub async fn scaffold(parent: &Path, config: &ProjectConfig) -> Result<ScaffoldReport> {
    config.validate().map_err(ScaffoldError::from)?;

    let root = project_dir(parent, config);
    if fs::try_exists(&root).await.unwrap_or(true) {
        return Err(ScaffoldError::TargetExists(root).into());
    }

    let files = write_files(&root, &render_project(config)).await?;
    Ok(ScaffoldReport { root, files })
}

async fn write_files(root: &Path, files: &[RenderedFile]) -> Result<Vec<String>> {
    fs::create_dir_all(root)
        .await
        .with_context(|| format!("Failed to create directory: {}", root.display()))?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&target, &file.contents)
            .await
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        written.push(file.path.clone());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RemoteRecord;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn shop() -> ProjectConfig {
        ProjectConfig::new(
            "shop",
            3000,
            vec![
                RemoteRecord::new("checkout", 3001, "App"),
                RemoteRecord::new("cart", 3002, "Cart"),
            ],
        )
    }

    fn tree(root: &Path) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }

    #[tokio::test]
    async fn test_scaffold_writes_rendered_tree() {
        let dir = TempDir::new().unwrap();
        let config = shop();

        let report = scaffold(dir.path(), &config).await.unwrap();
        assert_eq!(report.root, dir.path().join("shop"));

        let rendered = render_project(&config);
        let mut expected: Vec<String> = rendered.iter().map(|f| f.path.clone()).collect();
        assert_eq!(report.files, expected);
        expected.sort();
        assert_eq!(tree(&report.root), expected);

        for file in &rendered {
            let on_disk = std::fs::read_to_string(report.root.join(&file.path)).unwrap();
            assert_eq!(on_disk, file.contents, "{} differs", file.path);
        }
    }

    #[tokio::test]
    async fn test_existing_target_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("shop");
        std::fs::create_dir(&existing).unwrap();
        std::fs::write(existing.join("keep.txt"), "mine").unwrap();

        let err = scaffold(dir.path(), &shop()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::TargetExists(_))
        ));
        assert_eq!(tree(&existing), vec!["keep.txt"]);
    }

    #[tokio::test]
    async fn test_invalid_config_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::new(
            "shop",
            3000,
            vec![
                RemoteRecord::new("cart", 3001, "App"),
                RemoteRecord::new("Cart", 3002, "App"),
            ],
        );

        let err = scaffold(dir.path(), &config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::InvalidConfig(ConfigError::DuplicateRemote { .. }))
        ));
        assert!(!dir.path().join("shop").exists());
    }

    #[tokio::test]
    async fn test_remote_named_host_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::new("shop", 3000, vec![RemoteRecord::new("host", 3001, "App")]);

        let err = scaffold(dir.path(), &config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::InvalidConfig(ConfigError::ReservedName { .. }))
        ));
        assert!(!dir.path().join("shop").exists());
    }

    #[tokio::test]
    async fn test_path_like_exposes_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::new(
            "shop",
            3000,
            vec![RemoteRecord::new("cart", 3001, "../../../../escaped")],
        );

        let err = scaffold(dir.path(), &config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::InvalidConfig(ConfigError::InvalidRemote {
                field: "exposes",
                ..
            }))
        ));
        assert!(tree(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_names_path_and_keeps_partial_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("shop");
        std::fs::create_dir_all(root.join("apps")).unwrap();
        // A plain file where the cart app directory must go
        std::fs::write(root.join("apps/cart"), "blocked").unwrap();

        let err = write_files(&root, &render_project(&shop())).await.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to create directory"), "{}", message);
        let blocked = root.join("apps").join("cart").display().to_string();
        assert!(message.contains(&blocked), "{}", message);

        let written = tree(&root);
        assert!(written.contains(&"package.json".to_string()));
        assert!(written.contains(&"apps/host/src/App.jsx".to_string()));
        assert!(written.contains(&"apps/checkout/src/App.jsx".to_string()));
        assert!(!written.iter().any(|f| f.starts_with("apps/cart/")));
        assert_eq!(std::fs::read_to_string(root.join("apps/cart")).unwrap(), "blocked");
    }

    #[tokio::test]
    async fn test_scaffold_without_remotes() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::new("solo", 3000, vec![]);

        let report = scaffold(dir.path(), &config).await.unwrap();
        let registry = std::fs::read_to_string(report.root.join("mf.config.json")).unwrap();
        assert_eq!(registry, "{\n  \"remotes\": {}\n}\n");
        assert!(report.root.join("apps/host/src/App.jsx").exists());
    }
}
