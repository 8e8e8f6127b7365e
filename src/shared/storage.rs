use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Storage backend for uploaded binaries. Paths are relative; the backend
/// decides where they actually live.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn save(&self, relative_path: &str, contents: &[u8]) -> Result<()>;
    async fn remove(&self, relative_path: &str) -> Result<()>;
}

/// Writes files under a local media root.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn full_path(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, relative_path: &str, contents: &[u8]) -> Result<()> {
        let path = self.full_path(relative_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create media directory")?;
        }
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    async fn remove(&self, relative_path: &str) -> Result<()> {
        let path = self.full_path(relative_path);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone is fine; the database row is the source of truth.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
