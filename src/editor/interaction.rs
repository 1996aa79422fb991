//! Vehicle interaction
//!
//! Owns the single active object and turns pointer input into picking,
//! dragging and placement store mutations.
//!
//! Active object lifecycle:
//! - `None -> Preview` when a catalog type is chosen; the preview is a live
//!   object that is not in the store yet
//! - `Preview -> Selected` on commit (the preview becomes a placed record)
//! - `Preview -> None` on delete or when another preview/selection replaces it
//! - `None -> Selected` when a placed vehicle is picked
//! - `Selected -> None` on apply, delete or deselect
//!
//! Dragging only moves the live object. The record keeps its stored
//! transform until `apply_edit` copies the live transform back.

use crate::catalog::VehicleCatalog;
use crate::input::InputSnapshot;
use crate::math::{screen_to_ray, Vec2, Vec3};
use crate::placement::{PlacementStore, RecordHandle};
use crate::scene::{Entity, Scene, Transform};
use super::drag::{DragStep, DragTracker};
use super::EditorError;

/// The one object the editor is currently working on
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveObject {
    #[default]
    None,
    /// Uncommitted candidate
    Preview { entity: Entity, type_name: String },
    /// Committed vehicle picked for editing
    Selected(RecordHandle),
}

impl ActiveObject {
    #[cfg(test)]
    pub fn is_none(&self) -> bool {
        matches!(self, ActiveObject::None)
    }

    pub fn preview(&self) -> Option<Entity> {
        match self {
            ActiveObject::Preview { entity, .. } => Some(*entity),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<RecordHandle> {
        match self {
            ActiveObject::Selected(handle) => Some(*handle),
            _ => None,
        }
    }
}

/// What `delete` removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Preview discarded, store untouched
    PreviewDiscarded,
    /// Placed record removed along with its live object
    RecordRemoved(RecordHandle),
}

/// Interaction tunables
#[derive(Debug, Clone, Copy)]
pub struct InteractionSettings {
    pub spawn_origin: Vec3,
    pub spawn_offset: f32,
    pub drag_threshold: f32,
    pub rotation_step_degrees: f32,
    pub camera_follow_distance: f32,
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    active: ActiveObject,
    drag: DragTracker,
    /// Next preview spawn point. Advances on commit, never rewinds.
    spawn_cursor: Vec3,
    spawn_offset: f32,
    rotation_step_degrees: f32,
    camera_follow_distance: f32,
}

impl InteractionController {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            active: ActiveObject::None,
            drag: DragTracker::new(settings.drag_threshold),
            spawn_cursor: settings.spawn_origin,
            spawn_offset: settings.spawn_offset,
            rotation_step_degrees: settings.rotation_step_degrees,
            camera_follow_distance: settings.camera_follow_distance,
        }
    }

    pub fn active(&self) -> &ActiveObject {
        &self.active
    }

    #[cfg(test)]
    pub fn spawn_cursor(&self) -> Vec3 {
        self.spawn_cursor
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_armed()
    }

    /// Live object of the active preview or selection
    pub fn active_entity(&self, store: &PlacementStore) -> Option<Entity> {
        match &self.active {
            ActiveObject::None => None,
            ActiveObject::Preview { entity, .. } => Some(*entity),
            ActiveObject::Selected(handle) => store.get(*handle).map(|r| r.live),
        }
    }

    /// Spawn a highlighted preview of catalog entry `index` at the spawn cursor.
    pub fn begin_preview<S: Scene + ?Sized>(
        &mut self,
        index: usize,
        pointer: Vec2,
        catalog: &VehicleCatalog,
        scene: &mut S,
        store: &PlacementStore,
    ) -> Result<Entity, EditorError> {
        let Some(template) = catalog.get(index) else {
            let err = EditorError::InvalidIndex { index, len: catalog.len() };
            log::error!("{}", err);
            return Err(err);
        };

        self.deselect(scene, store);
        self.discard_preview(scene);

        let entity = scene.spawn(template, Transform::from_position(self.spawn_cursor));
        scene.set_highlight(entity, true);
        self.active = ActiveObject::Preview { entity, type_name: template.name.clone() };
        self.drag.arm(pointer);
        self.recenter_camera(scene, store);

        log::info!("Previewing {} at {:?}", template.name, self.spawn_cursor);
        Ok(entity)
    }

    /// Placed record under the pointer, if the primary button went down this frame
    pub fn pick<S: Scene + ?Sized>(
        &self,
        input: &InputSnapshot,
        scene: &S,
        store: &PlacementStore,
    ) -> Option<RecordHandle> {
        if !input.pointer_pressed {
            return None;
        }
        let ray = screen_to_ray(input.pointer_position, scene.camera());
        let Some(hit) = scene.raycast(&ray, None) else {
            log::debug!("Pick missed everything");
            return None;
        };
        let handle = hit.entity.and_then(|e| store.find(e));
        if handle.is_none() {
            log::debug!("No placed vehicle was clicked");
        }
        handle
    }

    /// Re-arm dragging when a press lands on the active preview.
    ///
    /// Previews have no record so `pick` never returns them; without this a
    /// released preview could not be dragged again.
    pub fn grab_preview<S: Scene + ?Sized>(&mut self, input: &InputSnapshot, scene: &S) -> bool {
        let Some(entity) = self.active.preview() else {
            return false;
        };
        if !input.pointer_pressed {
            return false;
        }
        let ray = screen_to_ray(input.pointer_position, scene.camera());
        let grabbed = scene.raycast(&ray, None).and_then(|hit| hit.entity) == Some(entity);
        if grabbed {
            self.drag.arm(input.pointer_position);
        }
        grabbed
    }

    /// Make `handle` the active selection: highlight, arm dragging, follow with the camera
    pub fn select<S: Scene + ?Sized>(
        &mut self,
        handle: RecordHandle,
        pointer: Vec2,
        scene: &mut S,
        store: &PlacementStore,
    ) -> bool {
        let Some(record) = store.get(handle) else {
            log::error!("Cannot select {}: not in the placement store", handle);
            return false;
        };
        let live = record.live;

        self.discard_preview(scene);
        self.deselect(scene, store);

        self.active = ActiveObject::Selected(handle);
        scene.set_highlight(live, true);
        self.drag.arm(pointer);
        self.recenter_camera(scene, store);

        log::info!("Selected {} ({})", handle, record.type_name);
        true
    }

    /// Move the active object under the pointer while the button is held.
    ///
    /// Returns true if the object moved this frame.
    pub fn handle_dragging<S: Scene + ?Sized>(
        &mut self,
        input: &InputSnapshot,
        scene: &mut S,
        store: &PlacementStore,
    ) -> bool {
        let Some(entity) = self.active_entity(store) else {
            self.drag.disarm();
            return false;
        };

        let DragStep::Moved(pointer) = self.drag.update(input) else {
            return false;
        };

        let ray = screen_to_ray(pointer, scene.camera());
        let Some(hit) = scene.raycast(&ray, Some(entity)) else {
            return false;
        };
        let Some(mut transform) = scene.transform(entity) else {
            return false;
        };
        transform.slide_to(hit.point);
        scene.set_transform(entity, transform)
    }

    /// Turn the preview into a placed record. The new record stays active.
    pub fn commit<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        store: &mut PlacementStore,
    ) -> Result<RecordHandle, EditorError> {
        let ActiveObject::Preview { entity, type_name } = &self.active else {
            log::error!("{}", EditorError::NoActivePreview);
            return Err(EditorError::NoActivePreview);
        };
        let (entity, type_name) = (*entity, type_name.clone());

        let Some(transform) = scene.transform(entity) else {
            self.active = ActiveObject::None;
            log::error!("Preview {} no longer exists", entity);
            return Err(EditorError::NoActivePreview);
        };

        scene.set_highlight(entity, false);
        let handle = store.insert(entity, type_name.as_str(), transform.position, transform.rotation);
        self.active = ActiveObject::Selected(handle);
        self.spawn_cursor.x += self.spawn_offset;

        log::info!(
            "Added {} as {} at {:?}, yaw {:.1}",
            type_name,
            handle,
            transform.position,
            transform.rotation.yaw().to_degrees()
        );
        Ok(handle)
    }

    /// Copy the selected live object's transform into its record and deselect.
    pub fn apply_edit<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        store: &mut PlacementStore,
    ) -> Result<RecordHandle, EditorError> {
        let Some(handle) = self.active.selected() else {
            log::error!("{}", EditorError::NoActiveSelection);
            return Err(EditorError::NoActiveSelection);
        };

        match store.get(handle).and_then(|r| scene.transform(r.live)) {
            Some(t) => {
                store.update(handle, t.position, t.rotation);
                log::info!("Updated {}: position {:?}, yaw {:.1}", handle, t.position, t.rotation.yaw().to_degrees());
            }
            None => log::error!("Failed to update {}: vehicle not found", handle),
        }

        self.deselect(scene, store);
        Ok(handle)
    }

    /// Discard the preview, or remove the selected record.
    pub fn delete<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        store: &mut PlacementStore,
    ) -> Result<DeleteOutcome, EditorError> {
        match std::mem::take(&mut self.active) {
            ActiveObject::Preview { entity, .. } => {
                scene.despawn(entity);
                self.drag.disarm();
                Ok(DeleteOutcome::PreviewDiscarded)
            }
            ActiveObject::Selected(handle) => {
                store.remove(scene, handle);
                self.drag.disarm();
                Ok(DeleteOutcome::RecordRemoved(handle))
            }
            ActiveObject::None => {
                log::error!("{}", EditorError::NothingToDelete);
                Err(EditorError::NothingToDelete)
            }
        }
    }

    /// Yaw the active object by the configured step. Returns false if nothing is active.
    pub fn rotate<S: Scene + ?Sized>(&mut self, scene: &mut S, store: &PlacementStore) -> bool {
        let Some(entity) = self.active_entity(store) else {
            log::warn!("Nothing selected or previewed to rotate");
            return false;
        };
        let Some(mut transform) = scene.transform(entity) else {
            return false;
        };
        transform.rotate_yaw(self.rotation_step_degrees);
        scene.set_transform(entity, transform)
    }

    /// Put the camera behind the active object, keeping its height
    pub fn recenter_camera<S: Scene + ?Sized>(&self, scene: &mut S, store: &PlacementStore) {
        let Some(position) = self.active_entity(store).and_then(|e| scene.transform(e)).map(|t| t.position) else {
            return;
        };
        let camera = scene.camera_mut();
        camera.position.x = position.x;
        camera.position.z = position.z - self.camera_follow_distance;
    }

    /// Clear the selection highlight and forget the selection. Previews stay.
    pub fn deselect<S: Scene + ?Sized>(&mut self, scene: &mut S, store: &PlacementStore) {
        if let ActiveObject::Selected(handle) = self.active {
            if let Some(record) = store.get(handle) {
                scene.set_highlight(record.live, false);
            }
            self.active = ActiveObject::None;
            self.drag.disarm();
        }
    }

    /// Drop whatever is active. Used before the store is replaced wholesale.
    pub fn reset<S: Scene + ?Sized>(&mut self, scene: &mut S, store: &PlacementStore) {
        self.deselect(scene, store);
        self.discard_preview(scene);
    }

    fn discard_preview<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let ActiveObject::Preview { entity, .. } = self.active {
            scene.despawn(entity);
            self.active = ActiveObject::None;
            self.drag.disarm();
        }
    }
}
