//! Vehicle Catalog
//!
//! The fixed list of vehicle types the editor can place. Each entry doubles
//! as the spawn template: its name is what gets written to save files, its
//! half extents size the pick collider, and its colour tints the rendered box.
//!
//! The catalog is built once from config and never mutated afterwards. The
//! placing UI addresses entries by index, save files address them by name.

use serde::{Serialize, Deserialize};
use crate::math::Vec3;

/// A spawnable vehicle type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    /// Type identifier, unique within the catalog
    pub name: String,
    /// Collider/box half size
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
    /// Body colour (RGB)
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

fn default_half_extents() -> Vec3 {
    Vec3::new(1.0, 0.75, 2.0)
}

fn default_color() -> [u8; 3] {
    [200, 200, 200]
}

impl VehicleType {
    pub fn new(name: impl Into<String>, half_extents: Vec3, color: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            half_extents,
            color,
        }
    }
}

/// Built-in vehicle types used when the config has no catalog
pub fn default_vehicle_types() -> Vec<VehicleType> {
    vec![
        VehicleType::new("Car", Vec3::new(1.0, 0.75, 2.0), [220, 60, 50]),
        VehicleType::new("Truck", Vec3::new(1.25, 1.5, 3.5), [60, 110, 200]),
        VehicleType::new("Bus", Vec3::new(1.25, 1.5, 5.0), [230, 180, 40]),
        VehicleType::new("Bike", Vec3::new(0.3, 0.6, 1.0), [60, 180, 90]),
    ]
}

/// Read-only catalog of placeable vehicle types
#[derive(Debug, Clone, Default)]
pub struct VehicleCatalog {
    types: Vec<VehicleType>,
}

impl VehicleCatalog {
    /// Build a catalog. Later entries reusing an earlier name are dropped.
    pub fn new(types: Vec<VehicleType>) -> Self {
        let mut unique: Vec<VehicleType> = Vec::with_capacity(types.len());
        for ty in types {
            if unique.iter().any(|t| t.name == ty.name) {
                log::warn!("Duplicate vehicle type '{}' in catalog, keeping the first", ty.name);
                continue;
            }
            unique.push(ty);
        }
        Self { types: unique }
    }

    pub fn get(&self, index: usize) -> Option<&VehicleType> {
        self.types.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&VehicleType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_index_and_name() {
        let catalog = VehicleCatalog::new(default_vehicle_types());
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(1).map(|t| t.name.as_str()), Some("Truck"));
        assert!(catalog.get(4).is_none());
        assert_eq!(catalog.find("Bus").map(|t| t.half_extents.z), Some(5.0));
        assert!(catalog.find("Tank").is_none());
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let catalog = VehicleCatalog::new(vec![
            VehicleType::new("Car", Vec3::new(1.0, 1.0, 1.0), [1, 2, 3]),
            VehicleType::new("Car", Vec3::new(9.0, 9.0, 9.0), [4, 5, 6]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("Car").map(|t| t.color), Some([1, 2, 3]));
    }
}
