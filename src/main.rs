//! Vehicle Garage: place, move and save vehicles in a 3D scene
//!
//! The window is a thin shell around `editor::EditorSession`:
//! - mouse state becomes one `InputSnapshot` per frame
//! - keys stand in for the mode, placement and edit panel buttons
//! - vehicles are drawn as wireframe boxes projected through the editor camera

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod catalog;
mod config;
mod editor;
mod input;
mod math;
mod placement;
mod scene;
mod storage;

use macroquad::prelude::{
    clear_background, draw_line, draw_rectangle, draw_text, get_frame_time, is_key_pressed,
    next_frame, screen_height, screen_width, Color, Conf, KeyCode, YELLOW,
};
use config::{EditorConfig, CONFIG_FILE};
use editor::{EditorSession, SessionConfig};
use input::InputSnapshot;
use math::{world_to_screen, Camera, Vec3};
use scene::{Scene, SceneObject, SceneWorld};
use storage::{default_data_dir, LocalStorage};

const BACKGROUND: Color = Color::new(0.12, 0.13, 0.15, 1.0);
const GRID_COLOR: Color = Color::new(0.25, 0.27, 0.3, 1.0);
const TEXT_COLOR: Color = Color::new(0.85, 0.85, 0.85, 1.0);
const GRID_EXTENT: i32 = 60;
const GRID_STEP: usize = 5;

const PREVIEW_KEYS: [KeyCode; 9] = [
    KeyCode::Key1, KeyCode::Key2, KeyCode::Key3,
    KeyCode::Key4, KeyCode::Key5, KeyCode::Key6,
    KeyCode::Key7, KeyCode::Key8, KeyCode::Key9,
];

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Vehicle Garage v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// `--play` starts with the player, `--load` loads the save file on entry
fn session_config_from_args() -> SessionConfig {
    let mut session = SessionConfig::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--play" => session.play_mode = true,
            "--load" => session.should_load = true,
            other => log::warn!("Ignoring unknown argument '{}'", other),
        }
    }
    session
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match EditorConfig::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to read {}: {}, using defaults", CONFIG_FILE, e);
            EditorConfig::default()
        }
    };

    let storage = LocalStorage::with_base_dir(default_data_dir());
    let mut session = EditorSession::with_world(&config, storage);
    session.enter(session_config_from_args());

    log::info!("=== Vehicle Garage v{} ===", VERSION);

    let mut status = String::new();

    loop {
        session.scene_mut().camera_mut().set_viewport(screen_width(), screen_height());

        let input = InputSnapshot::poll();
        session.tick(&input, get_frame_time());

        if let Some(message) = handle_keys(&mut session) {
            status = message;
        }

        clear_background(BACKGROUND);
        let camera = session.scene().camera();
        draw_ground_grid(camera, session.scene().ground_height());
        for object in session.scene().iter() {
            draw_vehicle(object, camera);
        }
        draw_hud(&session, &status);

        next_frame().await;
    }
}

/// Keyboard stand-ins for the UI buttons. Returns a status line when a command ran.
fn handle_keys(session: &mut EditorSession) -> Option<String> {
    let panels = session.panels();

    if panels.editor_ui {
        let modes: [(KeyCode, fn(&mut EditorSession)); 4] = [
            (KeyCode::F1, EditorSession::set_camera_movement_mode),
            (KeyCode::F2, EditorSession::set_vehicle_placing_mode),
            (KeyCode::F3, EditorSession::set_vehicle_edit_mode),
            (KeyCode::F4, EditorSession::set_play_mode),
        ];
        for (key, set_mode) in modes {
            if is_key_pressed(key) {
                set_mode(session);
                return Some(format!("Mode: {}", session.mode().label()));
            }
        }

        if is_key_pressed(KeyCode::F5) {
            return Some(match session.save() {
                Ok(count) => format!("Saved {} vehicles", count),
                Err(e) => format!("Save failed: {}", e),
            });
        }
        if is_key_pressed(KeyCode::F9) {
            return Some(match session.load() {
                Ok(report) if report.skipped.is_empty() => format!("Loaded {} vehicles", report.loaded),
                Ok(report) => format!("Loaded {} vehicles, skipped {:?}", report.loaded, report.skipped),
                Err(e) => format!("Load failed: {}", e),
            });
        }
    }

    if panels.placing {
        for (index, key) in PREVIEW_KEYS.iter().enumerate() {
            if is_key_pressed(*key) {
                return Some(match session.begin_preview(index) {
                    Ok(_) => format!("Previewing {}", session.catalog().get(index).map_or("?", |t| t.name.as_str())),
                    Err(e) => e.to_string(),
                });
            }
        }
        if is_key_pressed(KeyCode::Enter) {
            return Some(match session.commit() {
                Ok(handle) => format!("Added {}", handle),
                Err(e) => e.to_string(),
            });
        }
    }

    if panels.edit && is_key_pressed(KeyCode::A) {
        return Some(match session.apply_edit() {
            Ok(handle) => format!("Applied changes to {}", handle),
            Err(e) => e.to_string(),
        });
    }

    if panels.placing || panels.edit {
        if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
            return Some(match session.delete() {
                Ok(outcome) => format!("Deleted: {:?}", outcome),
                Err(e) => e.to_string(),
            });
        }
        if is_key_pressed(KeyCode::R) && session.rotate() {
            return Some("Rotated".to_string());
        }
    }

    if is_key_pressed(KeyCode::P) || is_key_pressed(KeyCode::Escape) {
        if panels.player_ui {
            session.despawn_player();
            return Some("Editor".to_string());
        }
        session.spawn_player();
        return Some("Playing".to_string());
    }

    None
}

/// Camera-space depth segments are clipped to before projecting
const NEAR_CLIP: f32 = 0.5;

fn draw_world_line(mut a: Vec3, mut b: Vec3, camera: &Camera, thickness: f32, color: Color) {
    let da = (a - camera.position).dot(camera.basis_z);
    let db = (b - camera.position).dot(camera.basis_z);
    if da < NEAR_CLIP && db < NEAR_CLIP {
        return;
    }
    // Pull the end behind the camera onto the near plane
    if da < NEAR_CLIP {
        a = a + (b - a) * ((NEAR_CLIP - da) / (db - da));
    } else if db < NEAR_CLIP {
        b = b + (a - b) * ((NEAR_CLIP - db) / (da - db));
    }

    if let (Some(sa), Some(sb)) = (world_to_screen(a, camera), world_to_screen(b, camera)) {
        draw_line(sa.x, sa.y, sb.x, sb.y, thickness, color);
    }
}

fn draw_ground_grid(camera: &Camera, height: f32) {
    let extent = GRID_EXTENT as f32;
    for i in (-GRID_EXTENT..=GRID_EXTENT).step_by(GRID_STEP) {
        let v = i as f32;
        draw_world_line(Vec3::new(v, height, -extent), Vec3::new(v, height, extent), camera, 1.0, GRID_COLOR);
        draw_world_line(Vec3::new(-extent, height, v), Vec3::new(extent, height, v), camera, 1.0, GRID_COLOR);
    }
}

/// Box edges as pairs of corner indices (bit 0 = x, bit 1 = y, bit 2 = z)
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7),
    (0, 2), (1, 3), (4, 6), (5, 7),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

fn draw_vehicle(object: &SceneObject, camera: &Camera) {
    let h = object.half_extents;
    let t = &object.transform;
    let corners: Vec<Vec3> = (0..8)
        .map(|i| {
            let local = Vec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            );
            t.position + t.rotation.rotate(local)
        })
        .collect();

    let (color, thickness) = if object.highlighted {
        (YELLOW, 3.0)
    } else {
        let [r, g, b] = object.color;
        (Color::from_rgba(r, g, b, 255), 2.0)
    };
    for (a, b) in BOX_EDGES {
        draw_world_line(corners[a], corners[b], camera, thickness, color);
    }

    // Nose marker so the heading is visible
    let nose = t.position + t.rotation.rotate(Vec3::new(0.0, h.y, h.z));
    draw_world_line(t.position + Vec3::new(0.0, h.y, 0.0), nose, camera, thickness, color);

    if let Some(label) = world_to_screen(t.position + Vec3::new(0.0, h.y, 0.0), camera) {
        draw_text(&object.type_name, label.x + 4.0, label.y - 4.0, 16.0, TEXT_COLOR);
    }
}

fn draw_hud(session: &EditorSession<SceneWorld>, status: &str) {
    let panels = session.panels();
    let mut lines = vec![
        format!(
            "Mode: {}   Vehicles: {}   Scene objects: {}",
            session.mode().label(),
            session.store().len(),
            session.scene().object_count(),
        ),
        format!("Active: {:?}", session.active()),
    ];
    if session.store().is_empty() && panels.editor_ui {
        lines.push("No vehicles placed yet (F2 to place)".to_string());
    }

    if panels.editor_ui {
        lines.push("F1 camera  F2 place  F3 edit  F4 play  F5 save  F9 load  P player".to_string());
    }
    if panels.placing {
        let names: Vec<String> = session
            .catalog()
            .names()
            .enumerate()
            .map(|(i, name)| format!("{} {}", i + 1, name))
            .collect();
        lines.push(format!("{}   Enter add  R rotate  Del delete", names.join("  ")));
    }
    if panels.edit {
        lines.push("A apply  R rotate  Del delete".to_string());
    }
    if panels.player_ui {
        lines.push("Playing   P / Esc back to editor".to_string());
    }
    if !status.is_empty() {
        lines.push(status.to_string());
    }

    let line_height = 20.0;
    draw_rectangle(0.0, 0.0, screen_width(), line_height * lines.len() as f32 + 8.0, Color::new(0.0, 0.0, 0.0, 0.5));
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 8.0, line_height * (i as f32 + 1.0), 18.0, TEXT_COLOR);
    }
}
