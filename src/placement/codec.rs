//! Save file codec
//!
//! Placements are written as pretty-printed JSON so saves stay readable and
//! diffable:
//!
//! ```json
//! {
//!   "vehicles": [
//!     { "name": "Car", "position": { "x": 0.0, "y": 0.75, "z": 0.0 },
//!       "rotation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 } }
//!   ]
//! }
//! ```
//!
//! Live handles are never written; they are recreated on load.

use serde::{Serialize, Deserialize};
use super::PlacementError;
use crate::math::{Quat, Vec3};

/// One saved placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleEntry {
    /// Catalog type name
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Top-level save document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveFile {
    pub vehicles: Vec<VehicleEntry>,
}

/// Serialize entries in the given order
pub fn encode(entries: &[VehicleEntry]) -> Result<Vec<u8>, PlacementError> {
    let doc = SaveFile { vehicles: entries.to_vec() };
    serde_json::to_vec_pretty(&doc).map_err(|e| PlacementError::Serialize(e.to_string()))
}

/// Parse a save document
pub fn decode(bytes: &[u8]) -> Result<Vec<VehicleEntry>, PlacementError> {
    let doc: SaveFile = serde_json::from_slice(bytes)?;
    Ok(doc.vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, x: f32, yaw_deg: f32) -> VehicleEntry {
        VehicleEntry {
            name: name.to_string(),
            position: Vec3::new(x, 0.75, -2.0),
            rotation: Quat::from_rotation_y(yaw_deg.to_radians()),
        }
    }

    #[test]
    fn test_document_layout() {
        let bytes = encode(&[entry("Car", 1.0, 0.0)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let first = &value["vehicles"][0];
        assert_eq!(first["name"], "Car");
        assert_eq!(first["position"]["x"], 1.0);
        assert_eq!(first["rotation"]["w"], 1.0);
        assert!(first.get("live").is_none());

        // Pretty-printed (one field per line)
        assert!(String::from_utf8(bytes).unwrap().lines().count() > 5);
    }

    #[test]
    fn test_decode_preserves_order() {
        let entries = vec![entry("Bus", 5.0, 10.0), entry("Car", 0.0, 0.0), entry("Bus", 10.0, 350.0)];
        let decoded = decode(&encode(&entries).unwrap()).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_decode_empty_list() {
        assert!(decode(br#"{ "vehicles": [] }"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(decode(b"not json"), Err(PlacementError::MalformedData(_))));
        // Missing the vehicles list
        assert!(matches!(decode(b"{}"), Err(PlacementError::MalformedData(_))));
        // Wrong shape for rotation
        let bad = br#"{ "vehicles": [ { "name": "Car", "position": {"x":0,"y":0,"z":0}, "rotation": "north" } ] }"#;
        assert!(matches!(decode(bad), Err(PlacementError::MalformedData(_))));
    }
}
