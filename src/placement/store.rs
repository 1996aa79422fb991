//! Placed record arena
//!
//! Records are keyed by a `RecordHandle` that is never reused, so iteration
//! over the map is insertion order and a handle held by the editor can only
//! ever refer to the record it was issued for. A second index maps live
//! entities back to their record for picking.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::codec::{decode, encode, VehicleEntry};
use super::PlacementError;
use crate::catalog::{VehicleCatalog, VehicleType};
use crate::math::{Quat, Vec3};
use crate::scene::{Entity, Scene, Transform};

/// Stable handle to a placed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordHandle(u32);

impl fmt::Display for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}", self.0)
    }
}

/// A committed vehicle placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRecord {
    /// Live scene object backing this record
    pub live: Entity,
    pub type_name: String,
    /// Stored transform. Only changes on apply, not while dragging.
    pub position: Vec3,
    pub rotation: Quat,
}

impl PlacedRecord {
    pub fn to_entry(&self) -> VehicleEntry {
        VehicleEntry {
            name: self.type_name.clone(),
            position: self.position,
            rotation: self.rotation,
        }
    }
}

/// Outcome of hydrating the store from saved entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrateReport {
    /// Records created
    pub loaded: usize,
    /// Type names with no catalog entry, one per skipped entry
    pub skipped: Vec<String>,
}

#[derive(Debug, Default)]
pub struct PlacementStore {
    records: BTreeMap<RecordHandle, PlacedRecord>,
    by_live: HashMap<Entity, RecordHandle>,
    next_id: u32,
}

impl PlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an already spawned live object as a new record.
    ///
    /// A live object can back at most one record; adopting it twice returns
    /// the existing handle.
    pub fn insert(&mut self, live: Entity, type_name: impl Into<String>, position: Vec3, rotation: Quat) -> RecordHandle {
        if let Some(&existing) = self.by_live.get(&live) {
            log::warn!("{} is already tracked as {}", live, existing);
            return existing;
        }
        let handle = RecordHandle(self.next_id);
        self.next_id += 1;
        self.records.insert(handle, PlacedRecord {
            live,
            type_name: type_name.into(),
            position,
            rotation,
        });
        self.by_live.insert(live, handle);
        handle
    }

    /// Spawn a new live object from `template` and record it
    pub fn add<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        template: &VehicleType,
        position: Vec3,
        rotation: Quat,
    ) -> RecordHandle {
        let live = scene.spawn(template, Transform::new(position, rotation));
        self.insert(live, template.name.as_str(), position, rotation)
    }

    /// Destroy a record and its live object. Unknown handles are logged and ignored.
    pub fn remove<S: Scene + ?Sized>(&mut self, scene: &mut S, handle: RecordHandle) -> bool {
        let Some(record) = self.records.remove(&handle) else {
            log::error!("Cannot remove {}: not in the placement store", handle);
            return false;
        };
        self.by_live.remove(&record.live);
        scene.despawn(record.live);
        log::info!("Removed {} ({}) at {:?}", handle, record.type_name, record.position);
        true
    }

    /// Record backed by a live object
    pub fn find(&self, live: Entity) -> Option<RecordHandle> {
        self.by_live.get(&live).copied()
    }

    pub fn get(&self, handle: RecordHandle) -> Option<&PlacedRecord> {
        self.records.get(&handle)
    }

    /// Overwrite the stored transform. Identity and type stay as they are.
    pub fn update(&mut self, handle: RecordHandle, position: Vec3, rotation: Quat) -> bool {
        match self.records.get_mut(&handle) {
            Some(record) => {
                record.position = position;
                record.rotation = rotation;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (RecordHandle, &PlacedRecord)> {
        self.records.iter().map(|(h, r)| (*h, r))
    }

    /// Destroy every record and live object
    pub fn clear<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        for (handle, record) in std::mem::take(&mut self.records) {
            log::debug!("Destroying {} ({})", handle, record.type_name);
            scene.despawn(record.live);
        }
        self.by_live.clear();
    }

    /// Saveable view of the records, in insertion order
    pub fn entries(&self) -> Vec<VehicleEntry> {
        self.iter().map(|(_, record)| record.to_entry()).collect()
    }

    /// Encode every record as a save document
    pub fn serialize(&self) -> Result<Vec<u8>, PlacementError> {
        encode(&self.entries())
    }

    /// Parse a save document into entries for `hydrate`
    pub fn deserialize(bytes: &[u8]) -> Result<Vec<VehicleEntry>, PlacementError> {
        decode(bytes)
    }

    /// Replace the whole store with `entries`.
    ///
    /// Existing records are destroyed first. Entries naming a type missing
    /// from the catalog are skipped; the rest still load.
    pub fn hydrate<S: Scene + ?Sized>(
        &mut self,
        entries: &[VehicleEntry],
        catalog: &VehicleCatalog,
        scene: &mut S,
    ) -> HydrateReport {
        log::info!("Clearing {} existing vehicles", self.len());
        self.clear(scene);

        let mut report = HydrateReport::default();
        for entry in entries {
            let Some(template) = catalog.find(&entry.name) else {
                log::warn!("Unknown vehicle type '{}', skipping", entry.name);
                report.skipped.push(entry.name.clone());
                continue;
            };
            let rotation = entry.rotation.normalize();
            self.add(scene, template, entry.position, rotation);
            report.loaded += 1;
        }
        report
    }

    /// Every record's live object is alive and indexed exactly once
    #[cfg(test)]
    pub fn is_consistent<S: Scene + ?Sized>(&self, scene: &S) -> bool {
        self.by_live.len() == self.records.len()
            && self.records.iter().all(|(h, r)| {
                scene.is_alive(r.live) && self.by_live.get(&r.live) == Some(h)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_vehicle_types;
    use crate::scene::SceneWorld;

    fn setup() -> (VehicleCatalog, SceneWorld, PlacementStore) {
        (VehicleCatalog::new(default_vehicle_types()), SceneWorld::new(0.0), PlacementStore::new())
    }

    fn entry(name: &str, x: f32) -> VehicleEntry {
        VehicleEntry {
            name: name.to_string(),
            position: Vec3::new(x, 1.0, 0.0),
            rotation: Quat::from_rotation_y(x.to_radians()),
        }
    }

    #[test]
    fn test_add_remove_counts() {
        let (catalog, mut scene, mut store) = setup();
        let car = catalog.find("Car").unwrap();

        let handles: Vec<_> = (0..5)
            .map(|i| store.add(&mut scene, car, Vec3::new(i as f32, 0.0, 0.0), Quat::IDENTITY))
            .collect();
        assert!(store.remove(&mut scene, handles[1]));
        assert!(store.remove(&mut scene, handles[3]));

        assert_eq!(store.len(), 3);
        assert_eq!(scene.object_count(), 3);
        assert!(store.is_consistent(&scene));
    }

    #[test]
    fn test_duplicates_allowed() {
        let (catalog, mut scene, mut store) = setup();
        let car = catalog.find("Car").unwrap();
        let a = store.add(&mut scene, car, Vec3::ZERO, Quat::IDENTITY);
        let b = store.add(&mut scene, car, Vec3::ZERO, Quat::IDENTITY);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (catalog, mut scene, mut store) = setup();
        let h = store.add(&mut scene, catalog.find("Bus").unwrap(), Vec3::ZERO, Quat::IDENTITY);
        assert!(store.remove(&mut scene, h));
        assert!(!store.remove(&mut scene, h));
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_by_live_entity() {
        let (catalog, mut scene, mut store) = setup();
        let h = store.add(&mut scene, catalog.find("Truck").unwrap(), Vec3::ZERO, Quat::IDENTITY);
        let live = store.get(h).unwrap().live;
        assert_eq!(store.find(live), Some(h));

        store.remove(&mut scene, h);
        assert_eq!(store.find(live), None);
    }

    #[test]
    fn test_insert_adopts_existing_object_once() {
        let (catalog, mut scene, mut store) = setup();
        let live = scene.spawn(catalog.find("Car").unwrap(), Transform::default());

        let h = store.insert(live, "Car", Vec3::ZERO, Quat::IDENTITY);
        assert_eq!(store.insert(live, "Car", Vec3::ZERO, Quat::IDENTITY), h);
        assert_eq!(store.len(), 1);
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_update_changes_transform_only() {
        let (catalog, mut scene, mut store) = setup();
        let h = store.add(&mut scene, catalog.find("Car").unwrap(), Vec3::ZERO, Quat::IDENTITY);
        let live = store.get(h).unwrap().live;

        let rot = Quat::from_rotation_y(0.5);
        assert!(store.update(h, Vec3::new(4.0, 1.0, 2.0), rot));

        let record = store.get(h).unwrap();
        assert_eq!(record.live, live);
        assert_eq!(record.type_name, "Car");
        assert_eq!(record.position, Vec3::new(4.0, 1.0, 2.0));
        assert_eq!(record.rotation, rot);
    }

    #[test]
    fn test_entries_in_insertion_order() {
        let (catalog, mut scene, mut store) = setup();
        for name in ["Bus", "Car", "Bike", "Car"] {
            store.add(&mut scene, catalog.find(name).unwrap(), Vec3::ZERO, Quat::IDENTITY);
        }
        let names: Vec<_> = store.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Bus", "Car", "Bike", "Car"]);
    }

    #[test]
    fn test_round_trip_through_hydrate() {
        let (catalog, mut scene, mut store) = setup();
        let original = vec![entry("Bike", 30.0), entry("Car", 10.0), entry("Bus", 20.0)];
        store.hydrate(&original, &catalog, &mut scene);

        let bytes = store.serialize().unwrap();
        let parsed = PlacementStore::deserialize(&bytes).unwrap();
        let report = store.hydrate(&parsed, &catalog, &mut scene);

        assert_eq!(report.loaded, 3);
        assert_eq!(store.len(), 3);
        assert_eq!(scene.object_count(), 3);
        for (want, got) in original.iter().zip(store.entries()) {
            assert_eq!(want.name, got.name);
            assert!(want.position.approx_eq(got.position, 0.0001));
            assert!(want.rotation.approx_eq(got.rotation, 0.0001));
        }
        assert!(store.is_consistent(&scene));
    }

    #[test]
    fn test_hydrate_is_destructive_and_skips_unknown() {
        let (catalog, mut scene, mut store) = setup();
        let old = store.add(&mut scene, catalog.find("Car").unwrap(), Vec3::ZERO, Quat::IDENTITY);
        let old_live = store.get(old).unwrap().live;

        let report = store.hydrate(&[entry("Hovercraft", 1.0), entry("Truck", 2.0)], &catalog, &mut scene);

        assert_eq!(report, HydrateReport { loaded: 1, skipped: vec!["Hovercraft".to_string()] });
        assert_eq!(store.len(), 1);
        assert!(store.get(old).is_none());
        assert!(!scene.is_alive(old_live));
        assert_eq!(store.entries()[0].name, "Truck");
        assert!(store.is_consistent(&scene));
    }

    #[test]
    fn test_hydrate_spawns_at_saved_transform() {
        let (catalog, mut scene, mut store) = setup();
        store.hydrate(&[entry("Bus", 45.0)], &catalog, &mut scene);

        let (_, record) = store.iter().next().unwrap();
        let t = scene.transform(record.live).unwrap();
        assert_eq!(t.position, Vec3::new(45.0, 1.0, 0.0));
        assert!(t.rotation.approx_eq(Quat::from_rotation_y(45f32.to_radians()), 0.0001));
    }
}
