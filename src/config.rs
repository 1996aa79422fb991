//! Editor configuration
//!
//! Loaded from a RON file next to the executable (`garage.ron`). Every field
//! is optional; anything left out falls back to the defaults below. A missing
//! file is not an error.
//!
//! ```ron
//! (
//!     rotation_step_degrees: 15.0,
//!     drag_threshold: 8.0,
//!     catalog: [
//!         (name: "Car", half_extents: (x: 1.0, y: 0.75, z: 2.0), color: (220, 60, 50)),
//!     ],
//! )
//! ```

use std::fmt;
use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::catalog::{default_vehicle_types, VehicleCatalog, VehicleType};
use crate::math::Vec3;

/// Default config file name
pub const CONFIG_FILE: &str = "garage.ron";

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunables for the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Yaw added per rotate command
    pub rotation_step_degrees: f32,
    /// Pointer travel (screen units) before a drag moves anything
    pub drag_threshold: f32,
    /// Where the first preview spawns
    pub spawn_origin: Vec3,
    /// Spawn cursor advance along +X after each commit
    pub spawn_offset: f32,
    /// Camera distance behind the active object on recenter
    pub camera_follow_distance: f32,
    /// Camera pan speed for swipes
    pub swipe_sensitivity: f32,
    /// Save file name inside the data directory
    pub save_file: String,
    /// Height of the ground collider
    pub ground_height: f32,
    pub catalog: Vec<VehicleType>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rotation_step_degrees: 10.0,
            drag_threshold: 5.0,
            spawn_origin: Vec3::new(0.0, 0.75, 0.0),
            spawn_offset: 5.0,
            camera_follow_distance: 30.0,
            swipe_sensitivity: 0.5,
            save_file: "vehicles.json".to_string(),
            ground_height: 0.0,
            catalog: default_vehicle_types(),
        }
    }
}

impl EditorConfig {
    /// Load from `path`, or defaults if the file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = ron::from_str(s)?;
        Ok(config)
    }

    pub fn build_catalog(&self) -> VehicleCatalog {
        let catalog = VehicleCatalog::new(self.catalog.clone());
        if catalog.is_empty() {
            log::warn!("Vehicle catalog is empty, nothing can be placed");
        }
        catalog
    }
}
