

use crate::db::{Storage, StorageConfig};

/// Fresh storage pointed at a unique file under the temp dir.
pub(crate) fn temp_storage() -> (Storage, std::path::PathBuf) {
    let path = std::env::temp_dir()
        .join("models_tests")
        .join(format!("users_{}.db", uuid::Uuid::new_v4()));
    let storage = Storage::new(StorageConfig::new(path.to_string_lossy().to_string()));
    (storage, path)
}

pub(crate) async fn cleanup(storage: &Storage, path: &std::path::Path) {
    let _ = storage.close().await;
    let _ = tokio::fs::remove_file(path).await;
}
