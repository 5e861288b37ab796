//! Composition root of the grapple platformer.
//!
//! `configure_full` opens the window and layers the render-only plugins over the
//! gameplay, among them the camera zoom that follows the hook. `configure_headless` runs
//! the same level, player and grapple physics without a window; the integration tests
//! drive that one.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::plugins;

#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Grapple Platformer".into(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        ..default()
    });

    // Windows: DX12 on the high-performance adapter.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    configure_game(app);
    plugins::register_render(app);
}

/// Gameplay without a window or renderer.
///
/// The caller supplies the runtime plugins (tests use `MinimalPlugins`). There are no
/// input devices, so grapple input is written to `GrappleInput` directly.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Game state and gameplay plugins.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
