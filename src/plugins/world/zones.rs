//! Kill and win zones.
//!
//! Zones are sensors on the `Zone` layer that only report players. A player entering a
//! kill zone is respawned; entering the win zone is logged.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::player::{Player, RespawnPlayer};

#[derive(Component)]
pub struct KillZone;

#[derive(Component)]
pub struct WinZone;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_zones);
    app.add_systems(
        FixedPostUpdate,
        detect_zone_entries
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

#[inline]
pub fn zone_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Zone, [Layer::Player])
}

fn zone_bundle(name: &'static str, center: Vec2, size: Vec2) -> impl Bundle {
    (
        Name::new(name),
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        Sensor,
        CollisionEventsEnabled,
        zone_layers(),
        DespawnOnExit(GameState::InGame),
    )
}

fn spawn_zones(mut commands: Commands) {
    commands.spawn((
        KillZone,
        zone_bundle("KillZone", Vec2::new(20.0, -4.0), Vec2::new(60.0, 2.0)),
    ));
    commands.spawn((
        WinZone,
        zone_bundle("WinZone", Vec2::new(37.5, 3.5), Vec2::new(1.0, 2.0)),
        Sprite::from_color(Color::srgba(0.3, 0.9, 0.4, 0.35), Vec2::new(1.0, 2.0)),
    ));
}

pub fn detect_zone_entries(
    mut started: MessageReader<CollisionStart>,
    q_kill: Query<(), With<KillZone>>,
    q_win: Query<(), With<WinZone>>,
    q_players: Query<(), With<Player>>,
    mut respawn: MessageWriter<RespawnPlayer>,
) {
    for ev in started.read() {
        for (zone, other, other_body) in [
            (ev.collider1, ev.collider2, ev.body2),
            (ev.collider2, ev.collider1, ev.body1),
        ] {
            let entrant = other_body.unwrap_or(other);
            let is_player = q_players.contains(entrant);

            if q_kill.contains(zone) {
                if is_player {
                    info!("player {entrant:?} fell into a kill zone");
                    respawn.write(RespawnPlayer { player: entrant });
                } else {
                    debug!("{entrant:?} entered kill zone {zone:?}");
                }
            } else if q_win.contains(zone) {
                if is_player {
                    info!("player {entrant:?} reached the goal");
                } else {
                    debug!("{entrant:?} entered win zone {zone:?}");
                }
            }
        }
    }
}
