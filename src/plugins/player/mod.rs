//! Player plugin: the grappling body and its respawn.
//!
//! ```text
//! OnEnter(InGame): spawn hook -> spawn player (Gun -> hook) -> tether joint
//!                  -> Hook -> player, Tether -> joint
//! Update:          R key -> RespawnPlayer
//!                  RespawnPlayer -> back to SpawnPoint + StopGrapple
//! ```
//!
//! The hook and the tether joint are created once here and reused for every shot; the
//! grapple plugin only flips their state.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::grapple::tether::{tether_joint_bundle, Tether};
use crate::plugins::grapple::{self, Gun, Hook, HookVisual, StopGrapple};

pub const PLAYER_START: Vec2 = Vec2::new(2.5, 3.0);
pub const PLAYER_RADIUS: f32 = 0.4;
pub const HOOK_RADIUS: f32 = 0.15;

#[derive(Component)]
pub struct Player;

/// Where a player goes back to on respawn.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec2,
}

/// Handle to the spawned player, written once on spawn.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlayerEntity(pub Option<Entity>);

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RespawnPlayer {
    pub player: Entity,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerEntity>()
        .add_message::<RespawnPlayer>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (
                request_respawn.run_if(resource_exists::<ButtonInput<KeyCode>>),
                respawn_players,
            )
                .chain()
                .before(grapple::gun::apply_stop_requests)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>, mut player_e: ResMut<PlayerEntity>) {
    let tuning = tunables.grapple;

    let hook = commands
        .spawn((
            Name::new("Hook"),
            Sprite::from_color(HookVisual::Unhooked.color(), Vec2::splat(HOOK_RADIUS * 2.0)),
            Transform::from_translation(PLAYER_START.extend(2.0)),
            Visibility::Hidden,
            RigidBody::Kinematic,
            Collider::circle(HOOK_RADIUS),
            grapple::hook::inactive_hook_layers(),
            CollisionEventsEnabled,
            SweptCcd::default(),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::ZERO,
            Mass(tuning.hook_mass),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    let mut player = commands.spawn((
        Name::new("Player"),
        Player,
        SpawnPoint {
            position: PLAYER_START,
        },
        Sprite::from_color(Color::srgb(0.2, 0.75, 0.9), Vec2::splat(PLAYER_RADIUS * 2.0)),
        Transform::from_translation(PLAYER_START.extend(1.0)),
        RigidBody::Dynamic,
        Collider::circle(PLAYER_RADIUS),
        CollisionLayers::new(Layer::Player, [Layer::World, Layer::Zone]),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::ZERO,
        Mass(tunables.player_mass),
        DespawnOnExit(GameState::InGame),
    ));

    match Gun::new(hook, tuning) {
        Ok(gun) => {
            player.insert(gun);
        }
        Err(err) => error!("player spawned without a grapple gun: {err}"),
    }

    let player = player.id();
    let joint = commands
        .spawn((
            tether_joint_bundle(player, hook, tuning.break_force),
            DespawnOnExit(GameState::InGame),
        ))
        .id();
    commands.entity(player).insert(Tether::default().with_joint(joint));
    commands.entity(hook).insert(Hook::new(player));
    player_e.0 = Some(player);

    info!("player {player:?} spawned at {PLAYER_START} with hook {hook:?} and tether {joint:?}");
}

fn request_respawn(
    keys: Res<ButtonInput<KeyCode>>,
    player_e: Res<PlayerEntity>,
    mut writer: MessageWriter<RespawnPlayer>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    if let Some(player) = player_e.0 {
        writer.write(RespawnPlayer { player });
    }
}

pub fn respawn_players(
    mut requests: MessageReader<RespawnPlayer>,
    mut q_players: Query<(&SpawnPoint, &mut Transform, &mut LinearVelocity, Has<Gun>), With<Player>>,
    mut stop: MessageWriter<StopGrapple>,
) {
    for req in requests.read() {
        let Ok((spawn, mut tf, mut vel, armed)) = q_players.get_mut(req.player) else {
            debug!("respawn requested for {:?}, which is not a player", req.player);
            continue;
        };

        tf.translation = spawn.position.extend(tf.translation.z);
        vel.0 = Vec2::ZERO;
        if armed {
            stop.write(StopGrapple { gun: req.player });
        }

        info!("player {:?} respawned at {}", req.player, spawn.position);
    }
}

#[cfg(test)]
mod tests;
