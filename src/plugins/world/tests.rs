use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::plugins::grapple::eligibility::{materialize_tile_catalogs, SurfaceEligibility};
use crate::plugins::player::{Player, RespawnPlayer};

use super::zones::{self, KillZone, WinZone};
use super::{parse_layout, MovingPlatform, Terrain, METAL, STONE};

#[test]
fn layout_rows_map_to_bottom_up_cells() {
    let cells = parse_layout(&["#.M", "##."]);
    assert_eq!(
        cells,
        vec![
            (IVec2::new(0, 1), STONE),
            (IVec2::new(2, 1), METAL),
            (IVec2::new(0, 0), STONE),
            (IVec2::new(1, 0), STONE),
        ]
    );
}

#[test]
fn terrain_is_one_static_body_with_tile_colliders() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_terrain);

    let (terrain, body) = world
        .query_filtered::<(Entity, &RigidBody), With<Terrain>>()
        .single(&world)
        .unwrap();
    assert_eq!(*body, RigidBody::Static);

    let tiles = world
        .query::<(&ChildOf, &Collider)>()
        .iter(&world)
        .filter(|(parent, _)| parent.parent() == terrain)
        .count();
    assert_eq!(tiles, parse_layout(super::LEVEL).len());
}

#[test]
fn terrain_metal_is_not_hookable_once_materialized() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_terrain);
    run_system_once(&mut world, materialize_tile_catalogs);

    let surface = world
        .query_filtered::<&SurfaceEligibility, With<Terrain>>()
        .single(&world)
        .unwrap();

    let (metal, _) = parse_layout(super::LEVEL)
        .into_iter()
        .find(|(_, kind)| *kind == METAL)
        .unwrap();
    let (stone, _) = parse_layout(super::LEVEL)
        .into_iter()
        .find(|(_, kind)| *kind == STONE)
        .unwrap();

    assert!(!surface.can_hook_at(metal.as_vec2() + Vec2::splat(0.5)));
    assert!(surface.can_hook_at(stone.as_vec2() + Vec2::splat(0.5)));
    assert!(surface.can_hook_at(Vec2::new(20.5, 12.5)));
}

#[test]
fn platform_velocity_follows_the_sine_path() {
    let p = MovingPlatform {
        origin: Vec2::ZERO,
        amplitude: Vec2::new(2.0, 0.0),
        period: 4.0,
    };
    let peak = 2.0 * std::f32::consts::TAU / 4.0;
    assert!((p.velocity_at(0.0) - Vec2::new(peak, 0.0)).length() < 1e-5);
    assert!(p.velocity_at(1.0).length() < 1e-5);
    assert!((p.velocity_at(2.0) + Vec2::new(peak, 0.0)).length() < 1e-5);

    let frozen = MovingPlatform { period: 0.0, ..p };
    assert_eq!(frozen.velocity_at(1.0), Vec2::ZERO);
}

#[test]
fn drive_platforms_writes_velocity() {
    let mut world = World::new();
    world.insert_resource(fixed_time_with_delta(0.5));
    let p = MovingPlatform {
        origin: Vec2::ZERO,
        amplitude: Vec2::new(0.0, 3.0),
        period: 6.0,
    };
    let e = world.spawn((p, LinearVelocity::ZERO)).id();

    run_system_once(&mut world, super::drive_platforms);

    let v = world.get::<LinearVelocity>(e).unwrap().0;
    assert!((v - p.velocity_at(0.5)).length() < 1e-5);
}

fn zone_world() -> World {
    let mut world = World::new();
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<RespawnPlayer>>();
    world
}

fn respawns(world: &mut World) -> Vec<RespawnPlayer> {
    run_system_once(world, |mut reader: MessageReader<RespawnPlayer>| {
        reader.read().copied().collect::<Vec<_>>()
    })
}

#[test]
fn player_entering_kill_zone_is_respawned() {
    let mut world = zone_world();
    let zone = world.spawn(KillZone).id();
    let player = world.spawn(Player).id();
    let collider = world.spawn_empty().id();

    world.write_message(CollisionStart {
        collider1: collider,
        collider2: zone,
        body1: Some(player),
        body2: None,
    });
    run_system_once(&mut world, zones::detect_zone_entries);

    assert_eq!(respawns(&mut world), vec![RespawnPlayer { player }]);
}

#[test]
fn other_bodies_and_win_zone_do_not_respawn() {
    let mut world = zone_world();
    let kill = world.spawn(KillZone).id();
    let win = world.spawn(WinZone).id();
    let player = world.spawn(Player).id();
    let rock = world.spawn_empty().id();

    world.write_message(CollisionStart {
        collider1: kill,
        collider2: rock,
        body1: None,
        body2: None,
    });
    world.write_message(CollisionStart {
        collider1: player,
        collider2: win,
        body1: Some(player),
        body2: None,
    });
    run_system_once(&mut world, zones::detect_zone_entries);

    assert!(respawns(&mut world).is_empty());
}
