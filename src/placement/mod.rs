//! Placement Store
//!
//! The authoritative list of committed vehicles and its save file codec.
//! Each record owns one live scene object; the store keeps the two in step:
//! - `add`/`insert` create a record for a new or adopted live object
//! - `remove`/`clear` destroy the live object together with its record
//! - `hydrate` replaces everything with entries read from a save file

mod codec;
mod store;

pub use codec::*;
pub use store::*;

use std::fmt;
use crate::storage::StorageError;

/// Placement store error types
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// Save file does not exist
    MissingFile(String),
    /// Save file exists but could not be parsed
    MalformedData(String),
    /// Encoding the save document failed
    Serialize(String),
    /// Underlying storage failure
    Storage(StorageError),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::MissingFile(path) => write!(f, "save file not found: {}", path),
            PlacementError::MalformedData(msg) => write!(f, "malformed save data: {}", msg),
            PlacementError::Serialize(msg) => write!(f, "serialization error: {}", msg),
            PlacementError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl std::error::Error for PlacementError {}

impl From<StorageError> for PlacementError {
    fn from(e: StorageError) -> Self {
        PlacementError::Storage(e)
    }
}

impl From<serde_json::Error> for PlacementError {
    fn from(e: serde_json::Error) -> Self {
        PlacementError::MalformedData(e.to_string())
    }
}
