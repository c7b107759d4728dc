#![cfg(test)]
use std::path::PathBuf;
use std::sync::Arc;

use models::{Storage, StorageConfig};

/// Unique SQLite file under the temp dir, removed by [`TempDb::cleanup`].
pub struct TempDb {
    path: PathBuf,
    opened: std::sync::Mutex<Vec<Arc<Storage>>>,
}

impl TempDb {
    pub fn new() -> Self {
        let path = std::env::temp_dir()
            .join("service_tests")
            .join(format!("users_{}.db", uuid::Uuid::new_v4()));
        Self { path, opened: std::sync::Mutex::new(Vec::new()) }
    }

    pub fn path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    /// A fresh storage handle on the same file; each call is a new pool.
    pub fn storage(&self) -> Arc<Storage> {
        let storage = Arc::new(Storage::new(StorageConfig::new(self.path())));
        self.opened.lock().unwrap().push(Arc::clone(&storage));
        storage
    }

    pub async fn cleanup(self) {
        let opened = std::mem::take(&mut *self.opened.lock().unwrap());
        for s in opened {
            let _ = s.close().await;
        }
        let _ = tokio::fs::remove_file(&self.path).await;
    }
}
