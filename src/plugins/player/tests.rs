use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::grapple::{Gun, Hook, HookPhase, StopGrapple, Tether, TetherJoint};

use super::{PlayerEntity, RespawnPlayer, SpawnPoint, PLAYER_START};

fn spawn_world(tunables: Tunables) -> World {
    let mut world = World::new();
    world.insert_resource(tunables);
    world.init_resource::<PlayerEntity>();
    run_system_once(&mut world, super::spawn);
    world
}

#[test]
fn spawn_links_player_gun_and_hook() {
    let mut world = spawn_world(Tunables::default());

    let player = world.resource::<PlayerEntity>().0.expect("player handle written");
    let gun = world.get::<Gun>(player).expect("player is armed");
    let hook_e = gun.hook_entity();

    let hook = world.get::<Hook>(hook_e).expect("hook exists");
    assert_eq!(hook.gun(), player);
    assert_eq!(hook.phase(), HookPhase::Idle);
    assert_eq!(*world.get::<Visibility>(hook_e).unwrap(), Visibility::Hidden);
    assert_eq!(*world.get::<RigidBody>(hook_e).unwrap(), RigidBody::Kinematic);

    assert_eq!(world.get::<Mass>(hook_e).unwrap().0, Tunables::default().grapple.hook_mass);
    assert_eq!(world.get::<Mass>(player).unwrap().0, Tunables::default().player_mass);

    let tether = world.get::<Tether>(player).unwrap();
    assert!(!tether.enabled);
    let joint_e = tether.joint().expect("tether joint spawned");
    assert!(world.get::<JointDisabled>(joint_e).is_some());
    let joint = world.get::<DistanceJoint>(joint_e).unwrap();
    assert_eq!((joint.body1, joint.body2), (player, hook_e));
    let marker = world.get::<TetherJoint>(joint_e).unwrap();
    assert_eq!(marker.break_force, Tunables::default().grapple.break_force);

    let players = world.query::<&super::Player>().iter(&world).count();
    assert_eq!(players, 1);
}

#[test]
fn invalid_tuning_spawns_an_unarmed_player() {
    let mut tunables = Tunables::default();
    tunables.grapple.min_distance = 100.0;
    let world = spawn_world(tunables);

    let player = world.resource::<PlayerEntity>().0.unwrap();
    assert!(world.get::<Gun>(player).is_none());
    assert!(world.get::<RigidBody>(player).is_some());
    assert!(world.get::<Tether>(player).is_some());
}

#[test]
fn respawn_resets_body_and_stops_the_grapple() {
    let mut world = spawn_world(Tunables::default());
    world.init_resource::<Messages<RespawnPlayer>>();
    world.init_resource::<Messages<StopGrapple>>();

    let player = world.resource::<PlayerEntity>().0.unwrap();
    world.get_mut::<Transform>(player).unwrap().translation = Vec3::new(20.0, -30.0, 1.0);
    world.get_mut::<LinearVelocity>(player).unwrap().0 = Vec2::new(5.0, -12.0);

    world.write_message(RespawnPlayer { player });
    run_system_once(&mut world, super::respawn_players);

    let tf = world.get::<Transform>(player).unwrap();
    assert_eq!(tf.translation, PLAYER_START.extend(1.0));
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
    assert_eq!(world.get::<SpawnPoint>(player).unwrap().position, PLAYER_START);

    let stops = run_system_once(&mut world, |mut reader: MessageReader<StopGrapple>| {
        reader.read().copied().collect::<Vec<_>>()
    });
    assert_eq!(stops, vec![StopGrapple { gun: player }]);
}

#[test]
fn respawn_for_non_player_is_ignored() {
    let mut world = World::new();
    world.init_resource::<Messages<RespawnPlayer>>();
    world.init_resource::<Messages<StopGrapple>>();
    let crate_box = world
        .spawn((Transform::from_xyz(3.0, 3.0, 0.0), LinearVelocity(Vec2::ONE)))
        .id();

    world.write_message(RespawnPlayer { player: crate_box });
    run_system_once(&mut world, super::respawn_players);

    assert_eq!(world.get::<LinearVelocity>(crate_box).unwrap().0, Vec2::ONE);
    let stops = run_system_once(&mut world, |mut reader: MessageReader<StopGrapple>| {
        reader.read().count()
    });
    assert_eq!(stops, 0);
}
