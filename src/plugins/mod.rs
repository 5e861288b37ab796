//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::grapple::GrapplePlugin;

pub mod core;
pub mod grapple;
pub mod physics;
pub mod player;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod tether;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    player::plugin(app);
    app.add_plugins(GrapplePlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    tether::plugin(app);
}
