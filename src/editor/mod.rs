//! Vehicle Editor
//!
//! Interactive placement of vehicles in the garage scene:
//! - Mode machine (camera / placing / edit / play) gating per-frame behaviour
//! - Interaction controller for picking, dragging and committing vehicles
//! - Session tying both to the placement store and the save file

mod camera_pan;
mod drag;
mod interaction;
mod mode;
mod session;

pub use session::*;

use std::fmt;
use crate::placement::PlacementError;

/// Editor command errors
///
/// All of these are recoverable: the command is aborted and the editor state
/// is left as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Catalog selection out of range
    InvalidIndex { index: usize, len: usize },
    /// Commit without a preview
    NoActivePreview,
    /// Apply without a selection
    NoActiveSelection,
    /// Delete with neither a preview nor a selection
    NothingToDelete,
    /// Save or load failed
    Placement(PlacementError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::InvalidIndex { index, len } => {
                write!(f, "invalid vehicle index {} (catalog has {})", index, len)
            }
            EditorError::NoActivePreview => write!(f, "no vehicle preview to add"),
            EditorError::NoActiveSelection => write!(f, "no vehicle selected to apply changes to"),
            EditorError::NothingToDelete => write!(f, "no vehicle selected or previewed to delete"),
            EditorError::Placement(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<PlacementError> for EditorError {
    fn from(e: PlacementError) -> Self {
        EditorError::Placement(e)
    }
}
