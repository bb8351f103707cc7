//! Temporary-artifact ledger.
//!
//! Every path a pipeline run creates is registered here the moment it is
//! created; `release_all` runs exactly once per request, on every exit
//! path, and is the only place temp files are deleted.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Tracks every temporary artifact of one pipeline run.
#[derive(Debug, Default)]
pub struct ResourceLedger {
    paths: Vec<PathBuf>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path for cleanup. Registering the same path twice is
    /// harmless; deletion is idempotent.
    pub fn track(&mut self, path: impl AsRef<Path>) {
        self.paths.push(path.as_ref().to_path_buf());
    }

    /// Number of tracked paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Delete every tracked path that still exists.
    ///
    /// Directories are removed recursively. Individual deletion errors are
    /// logged, never raised. Files are removed in reverse registration
    /// order so entries inside a tracked directory go first.
    pub async fn release_all(&mut self) {
        for path in self.paths.drain(..).rev() {
            let meta = match tokio::fs::metadata(&path).await {
                Ok(m) => m,
                Err(_) => continue,
            };

            let result = if meta.is_dir() {
                tokio::fs::remove_dir_all(&path).await
            } else {
                tokio::fs::remove_file(&path).await
            };

            match result {
                Ok(()) => debug!("Removed temp artifact {}", path.display()),
                Err(e) => warn!("Failed to remove temp artifact {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_release_all_removes_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        tokio::fs::write(&a, b"x").await.unwrap();
        tokio::fs::write(&b, b"y").await.unwrap();

        let mut ledger = ResourceLedger::new();
        ledger.track(&a);
        ledger.track(&b);
        ledger.release_all().await;

        assert!(!a.exists());
        assert!(!b.exists());
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_release_all_removes_directories() {
        let dir = TempDir::new().unwrap();
        let work = dir.path().join("req-1");
        tokio::fs::create_dir_all(&work).await.unwrap();
        tokio::fs::write(work.join("pass1.wav"), b"x").await.unwrap();

        let mut ledger = ResourceLedger::new();
        ledger.track(&work);
        ledger.release_all().await;

        assert!(!work.exists());
    }

    #[tokio::test]
    async fn test_release_all_tolerates_missing_paths() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("never-created.wav");

        let mut ledger = ResourceLedger::new();
        ledger.track(&gone);
        // Must not panic or error
        ledger.release_all().await;
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_release_all_handles_nested_registration() {
        let dir = TempDir::new().unwrap();
        let work = dir.path().join("req-2");
        let inner = work.join("music.mp3");
        tokio::fs::create_dir_all(&work).await.unwrap();
        tokio::fs::write(&inner, b"x").await.unwrap();

        let mut ledger = ResourceLedger::new();
        ledger.track(&work);
        ledger.track(&inner);
        ledger.release_all().await;

        assert!(!inner.exists());
        assert!(!work.exists());
    }

    #[tokio::test]
    async fn test_double_tracking_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.wav");
        tokio::fs::write(&a, b"x").await.unwrap();

        let mut ledger = ResourceLedger::new();
        ledger.track(&a);
        ledger.track(&a);
        ledger.release_all().await;
        assert!(!a.exists());
    }
}
