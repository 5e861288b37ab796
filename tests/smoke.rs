mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use grapple_platformer::plugins::grapple::eligibility::SurfaceEligibility;
use grapple_platformer::plugins::grapple::{Hook, HookPhase, TetherJoint};
use grapple_platformer::plugins::player::Player;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn level_player_and_idle_hook_are_spawned() {
    let mut app = common::app_in_game();
    for _ in 0..5 {
        app.update();
    }

    let players = app
        .world_mut()
        .query::<&Player>()
        .iter(app.world())
        .count();
    assert_eq!(players, 1);

    let surfaces = app
        .world_mut()
        .query::<&SurfaceEligibility>()
        .iter(app.world())
        .count();
    assert_eq!(surfaces, 1);

    let player = common::player(&app);
    let hook = common::hook(&app);
    assert_eq!(app.world().get::<Hook>(hook).unwrap().phase(), HookPhase::Idle);
    assert_eq!(*app.world().get::<Visibility>(hook).unwrap(), Visibility::Hidden);
    assert_eq!(*app.world().get::<RigidBody>(hook).unwrap(), RigidBody::Kinematic);
    assert!(!common::tether(&app).enabled);

    let joint = common::tether_joint(&app);
    assert!(app.world().get::<JointDisabled>(joint).is_some());
    let marker = app.world().get::<TetherJoint>(joint).unwrap();
    assert_eq!((marker.gun, marker.hook), (player, hook));
}
