//! Storage Layer
//!
//! Save files live in a single base directory (the platform data directory
//! in the editor shell, a temp dir in tests). Every operation is synchronous:
//! saves and loads only run on explicit user action, never per frame.

pub mod local;

pub use local::LocalStorage;

use std::fmt;
use std::path::PathBuf;

/// Storage error types
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// File or directory not found
    NotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// I/O error
    IoError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(path) => write!(f, "not found: {}", path),
            StorageError::PermissionDenied(msg) => write!(f, "permission denied: {}", msg),
            StorageError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}

/// Directory save files go to when none is given explicitly
///
/// Native: `<data dir>/vehicle-garage`, or the working directory if the
/// platform has no data dir. WASM: the working directory.
pub fn default_data_dir() -> PathBuf {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(dir) = dirs::data_dir() {
            return dir.join(env!("CARGO_PKG_NAME"));
        }
    }
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let e = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(StorageError::from(e), StorageError::NotFound(_)));

        let e = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(StorageError::from(e), StorageError::PermissionDenied(_)));

        let e = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(StorageError::from(e), StorageError::IoError("boom".to_string()));
    }
}
