//! Editor mode state machine
//!
//! Four modes, switched explicitly by UI buttons or by the editor itself
//! (selecting a vehicle enters VehicleEdit, applying an edit returns to
//! CameraMovement). Each switch runs the exit action of the current mode,
//! then the entry action of the target. Both only touch panel visibility,
//! plus a deselect request around CameraMovement; running them again for
//! the same mode leaves everything as it was.

/// Editor interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    #[default]
    CameraMovement,
    VehiclePlacing,
    VehicleEdit,
    PlayMode,
}

impl EditorMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditorMode::CameraMovement => "Camera",
            EditorMode::VehiclePlacing => "Place",
            EditorMode::VehicleEdit => "Edit",
            EditorMode::PlayMode => "Play",
        }
    }

    /// Per-frame behaviours active in this mode
    pub fn behaviors(&self) -> FrameBehaviors {
        match self {
            EditorMode::CameraMovement => FrameBehaviors {
                camera_pan: true,
                selection: true,
                dragging: false,
            },
            EditorMode::VehiclePlacing | EditorMode::VehicleEdit => FrameBehaviors {
                camera_pan: false,
                selection: true,
                dragging: true,
            },
            // Input belongs to the player controller
            EditorMode::PlayMode => FrameBehaviors::default(),
        }
    }
}

/// Which interaction behaviours run each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameBehaviors {
    pub camera_pan: bool,
    pub selection: bool,
    pub dragging: bool,
}

/// Visibility of the UI surfaces
///
/// Mode switches only touch `placing` and `edit`. The editor and player
/// surfaces are toggled by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelVisibility {
    /// Vehicle picker / add / rotate / delete
    pub placing: bool,
    /// Apply / rotate / delete for a selected vehicle
    pub edit: bool,
    /// Mode buttons, save and load
    pub editor_ui: bool,
    /// Player controls
    pub player_ui: bool,
}

impl PanelVisibility {
    /// Number of mode panels shown
    #[cfg(test)]
    pub fn visible_count(&self) -> usize {
        self.placing as usize + self.edit as usize
    }
}

/// Result of a mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: EditorMode,
    pub to: EditorMode,
    /// The active selection must be cleared
    pub deselect: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ModeMachine {
    current: EditorMode,
    panels: PanelVisibility,
}

impl ModeMachine {
    /// Starts in CameraMovement with no panel shown
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> EditorMode {
        self.current
    }

    pub fn panels(&self) -> PanelVisibility {
        self.panels
    }

    pub fn set_surfaces(&mut self, editor_ui: bool, player_ui: bool) {
        self.panels.editor_ui = editor_ui;
        self.panels.player_ui = player_ui;
    }

    pub fn switch_mode(&mut self, target: EditorMode) -> ModeTransition {
        let from = self.current;
        let mut deselect = self.exit(from);
        self.current = target;
        deselect |= self.enter(target);
        ModeTransition { from, to: target, deselect }
    }

    /// Exit action. Returns true if the selection must be cleared.
    fn exit(&mut self, mode: EditorMode) -> bool {
        match mode {
            EditorMode::CameraMovement => {
                self.show_panels(false, false);
                true
            }
            EditorMode::VehiclePlacing => {
                self.panels.placing = false;
                false
            }
            EditorMode::VehicleEdit => {
                self.panels.edit = false;
                false
            }
            EditorMode::PlayMode => {
                self.show_panels(false, false);
                false
            }
        }
    }

    /// Entry action. Returns true if the selection must be cleared.
    fn enter(&mut self, mode: EditorMode) -> bool {
        match mode {
            EditorMode::CameraMovement => {
                self.show_panels(false, false);
                true
            }
            EditorMode::VehiclePlacing => {
                self.show_panels(true, false);
                false
            }
            EditorMode::VehicleEdit => {
                self.show_panels(false, true);
                false
            }
            EditorMode::PlayMode => {
                self.show_panels(false, false);
                false
            }
        }
    }

    fn show_panels(&mut self, placing: bool, edit: bool) {
        self.panels.placing = placing;
        self.panels.edit = edit;
    }
}
