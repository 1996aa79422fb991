//! Editor session
//!
//! Wires the catalog, scene, placement store, interaction controller and
//! mode machine together and exposes the operations the UI calls. The shell
//! drives it with one `tick` per frame and forwards button presses to the
//! command methods.

use crate::catalog::VehicleCatalog;
use crate::config::EditorConfig;
use crate::input::InputSnapshot;
use crate::math::Vec2;
use crate::placement::{HydrateReport, PlacementError, PlacementStore, RecordHandle, VehicleEntry};
use crate::scene::{Entity, Scene, SceneWorld};
use crate::storage::{LocalStorage, StorageError};
use super::camera_pan::CameraPan;
use super::interaction::{ActiveObject, DeleteOutcome, InteractionController, InteractionSettings};
use super::mode::{EditorMode, ModeMachine, ModeTransition, PanelVisibility};
use super::EditorError;

/// How the scene is entered, chosen by the menu before the session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    /// Start with the player active instead of the editor
    pub play_mode: bool,
    /// Load the save file on entry
    pub should_load: bool,
}

pub struct EditorSession<S: Scene = SceneWorld> {
    catalog: VehicleCatalog,
    scene: S,
    store: PlacementStore,
    controller: InteractionController,
    modes: ModeMachine,
    camera_pan: CameraPan,
    storage: LocalStorage,
    save_path: String,
    /// Pointer position from the latest tick, used as the drag anchor for UI commands
    last_pointer: Vec2,
}

impl EditorSession<SceneWorld> {
    /// Session over a fresh `SceneWorld`
    pub fn with_world(config: &EditorConfig, storage: LocalStorage) -> Self {
        Self::new(config, SceneWorld::new(config.ground_height), storage)
    }
}

impl<S: Scene> EditorSession<S> {
    pub fn new(config: &EditorConfig, scene: S, storage: LocalStorage) -> Self {
        let settings = InteractionSettings {
            spawn_origin: config.spawn_origin,
            spawn_offset: config.spawn_offset,
            drag_threshold: config.drag_threshold,
            rotation_step_degrees: config.rotation_step_degrees,
            camera_follow_distance: config.camera_follow_distance,
        };
        Self {
            catalog: config.build_catalog(),
            scene,
            store: PlacementStore::new(),
            controller: InteractionController::new(settings),
            modes: ModeMachine::new(),
            camera_pan: CameraPan::new(config.swipe_sensitivity),
            storage,
            save_path: config.save_file.clone(),
            last_pointer: Vec2::ZERO,
        }
    }

    /// Scene entry: pick the player or editor surfaces, then optionally load.
    pub fn enter(&mut self, session: SessionConfig) {
        log::info!("Entering scene (play: {}, load: {})", session.play_mode, session.should_load);
        if session.play_mode {
            self.spawn_player();
        } else {
            self.despawn_player();
        }

        if session.should_load {
            // Already logged; an empty scene is a valid start
            let _ = self.load();
        }
    }

    /// Per-frame dispatch for the current mode
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) {
        self.last_pointer = input.pointer_position;
        let behaviors = self.modes.current().behaviors();

        if behaviors.camera_pan {
            self.camera_pan.update(input, dt, self.scene.camera_mut());
        }

        // A press consumed by selection does not also start a drag this frame
        let mut pressed_on_object = false;
        if behaviors.selection {
            if let Some(handle) = self.controller.pick(input, &self.scene, &self.store) {
                self.switch_mode(EditorMode::VehicleEdit);
                pressed_on_object = self.controller.select(handle, input.pointer_position, &mut self.scene, &self.store);
            } else {
                pressed_on_object = self.controller.grab_preview(input, &self.scene);
            }
        }

        if behaviors.dragging && !pressed_on_object {
            self.controller.handle_dragging(input, &mut self.scene, &self.store);
        }
    }

    // ---- modes ----

    pub fn switch_mode(&mut self, target: EditorMode) -> ModeTransition {
        let transition = self.modes.switch_mode(target);
        log::debug!("Mode {} -> {}", transition.from.label(), transition.to.label());
        if transition.deselect {
            self.controller.deselect(&mut self.scene, &self.store);
        }
        transition
    }

    pub fn set_camera_movement_mode(&mut self) {
        self.switch_mode(EditorMode::CameraMovement);
    }

    pub fn set_vehicle_placing_mode(&mut self) {
        self.switch_mode(EditorMode::VehiclePlacing);
    }

    pub fn set_vehicle_edit_mode(&mut self) {
        self.switch_mode(EditorMode::VehicleEdit);
    }

    pub fn set_play_mode(&mut self) {
        self.switch_mode(EditorMode::PlayMode);
    }

    /// Hand input to the player and swap the editor UI for the player UI
    pub fn spawn_player(&mut self) {
        self.switch_mode(EditorMode::PlayMode);
        self.modes.set_surfaces(false, true);
        log::info!("Player spawned");
    }

    /// Back to the editor
    pub fn despawn_player(&mut self) {
        self.switch_mode(EditorMode::CameraMovement);
        self.modes.set_surfaces(true, false);
        log::info!("Player despawned");
    }

    // ---- placement commands ----

    pub fn begin_preview(&mut self, index: usize) -> Result<Entity, EditorError> {
        self.controller
            .begin_preview(index, self.last_pointer, &self.catalog, &mut self.scene, &self.store)
    }

    pub fn commit(&mut self) -> Result<RecordHandle, EditorError> {
        self.controller.commit(&mut self.scene, &mut self.store)
    }

    /// Persist the dragged transform and return to camera movement
    pub fn apply_edit(&mut self) -> Result<RecordHandle, EditorError> {
        let handle = self.controller.apply_edit(&mut self.scene, &mut self.store)?;
        self.set_camera_movement_mode();
        Ok(handle)
    }

    pub fn delete(&mut self) -> Result<DeleteOutcome, EditorError> {
        self.controller.delete(&mut self.scene, &mut self.store)
    }

    pub fn rotate(&mut self) -> bool {
        self.controller.rotate(&mut self.scene, &self.store)
    }

    // ---- persistence ----

    /// Write every record to the save file. Returns the number written.
    pub fn save(&self) -> Result<usize, EditorError> {
        if let Err(e) = self.write_save_file() {
            log::error!("Failed to save vehicles: {}", e);
            return Err(e.into());
        }
        log::info!("Saved {} vehicles to {}", self.store.len(), self.storage.resolve(&self.save_path).display());
        Ok(self.store.len())
    }

    /// Replace the scene's vehicles with the save file contents.
    ///
    /// A missing or malformed file leaves everything untouched.
    pub fn load(&mut self) -> Result<HydrateReport, EditorError> {
        let entries = match self.read_save_file() {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Failed to load vehicles: {}", e);
                return Err(e.into());
            }
        };

        self.controller.reset(&mut self.scene, &self.store);
        let report = self.store.hydrate(&entries, &self.catalog, &mut self.scene);
        log::info!("Loaded {} vehicles ({} skipped)", report.loaded, report.skipped.len());
        Ok(report)
    }

    fn write_save_file(&self) -> Result<(), PlacementError> {
        let bytes = self.store.serialize()?;
        self.storage.write(&self.save_path, &bytes)?;
        Ok(())
    }

    fn read_save_file(&self) -> Result<Vec<VehicleEntry>, PlacementError> {
        let bytes = self.storage.read(&self.save_path).map_err(|e| match e {
            StorageError::NotFound(_) => {
                PlacementError::MissingFile(self.storage.resolve(&self.save_path).display().to_string())
            }
            other => PlacementError::Storage(other),
        })?;
        PlacementStore::deserialize(&bytes)
    }

    // ---- accessors ----

    pub fn mode(&self) -> EditorMode {
        self.modes.current()
    }

    pub fn panels(&self) -> PanelVisibility {
        self.modes.panels()
    }

    pub fn active(&self) -> &ActiveObject {
        self.controller.active()
    }

    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}
