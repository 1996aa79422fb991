//! Local filesystem storage backend

use super::StorageError;
use std::path::PathBuf;

/// Local filesystem storage rooted at a base directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Storage rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    /// Storage rooted at a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a path relative to the base directory
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Read a whole file
    pub fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    /// Create or overwrite a file, creating parent directories as needed
    pub fn write(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_write_and_read() {
        let (_dir, storage) = setup_test_dir();

        storage.write("vehicles.json", b"{}").unwrap();
        assert_eq!(storage.read("vehicles.json").unwrap(), b"{}");
    }

    #[test]
    fn test_read_not_found() {
        let (_dir, storage) = setup_test_dir();

        let result = storage.read("nonexistent.json");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_write_overwrites() {
        let (_dir, storage) = setup_test_dir();

        storage.write("vehicles.json", b"old contents").unwrap();
        storage.write("vehicles.json", b"new").unwrap();
        assert_eq!(storage.read("vehicles.json").unwrap(), b"new");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (_dir, storage) = setup_test_dir();

        storage.write("slots/level_1/vehicles.json", b"data").unwrap();
        assert_eq!(storage.read("slots/level_1/vehicles.json").unwrap(), b"data");
    }
}
