//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - `TimeUpdateStrategy::ManualDuration` advances one fixed step per update, so the
//!   physics/contact schedules run deterministically.
//! - we then call `grapple_platformer::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;

use grapple_platformer::plugins::grapple::{Gun, Tether};
use grapple_platformer::plugins::player::PlayerEntity;
use grapple_platformer::plugins::world::{MovingPlatform, Terrain};

/// Default `Time<Fixed>` timestep (64 Hz).
pub const STEP: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        TransformPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    grapple_platformer::game::configure_headless(&mut app);
    app
}

/// Headless app that already ran `OnEnter(InGame)`.
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.update();
    app
}

pub fn player(app: &App) -> Entity {
    app.world()
        .resource::<PlayerEntity>()
        .0
        .expect("player spawned on enter")
}

pub fn hook(app: &App) -> Entity {
    app.world()
        .get::<Gun>(player(app))
        .expect("player is armed")
        .hook_entity()
}

pub fn position(app: &App, e: Entity) -> Vec2 {
    app.world().get::<Transform>(e).unwrap().translation.truncate()
}

pub fn tether(app: &App) -> &Tether {
    app.world()
        .get::<Tether>(player(app))
        .expect("player has a tether")
}

pub fn tether_joint(app: &App) -> Entity {
    tether(app).joint().expect("tether joint spawned")
}

/// Remove terrain and platforms so bodies move through open space.
pub fn clear_level(app: &mut App) {
    let world = app.world_mut();
    let solids: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Terrain>, With<MovingPlatform>)>>()
        .iter(world)
        .collect();
    for e in solids {
        world.despawn(e);
    }
}
