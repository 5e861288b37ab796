//! Camera plugin (render-only).
//!
//! The camera follows the player and zooms out while the hook is extended. Both use the
//! same exponential blend so they stay frame-rate independent.
//!
//! A system cannot hold `Query<&Transform>` and `Query<&mut Transform>` at once unless
//! Bevy can prove the queries are disjoint (B0001). Disjointness is encoded with
//! `Without<...>` filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera -> write MainCameraEntity resource
//! PostUpdate:      follow_player, smooth_camera_zoom -> apply_camera_zoom
//! ```

use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::{smoothing, state::GameState, tunables::Tunables};
use crate::plugins::grapple::Gun;
use crate::plugins::player::{Player, PlayerEntity};

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

/// Orthographic half-height in world units.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CameraZoom {
    pub current: f32,
}

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct MainCameraEntity(pub Option<Entity>);

pub fn plugin(app: &mut App) {
    app.init_resource::<MainCameraEntity>()
        .add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            (follow_player, smooth_camera_zoom, apply_camera_zoom)
                .chain()
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn viewport_height(zoom: f32) -> ScalingMode {
    ScalingMode::FixedVertical {
        viewport_height: 2.0 * zoom,
    }
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let zoom = tunables.grapple.camera_initial_zoom;
    let e = commands
        .spawn((
            Name::new("MainCamera"),
            Camera2d,
            Projection::Orthographic(OrthographicProjection {
                scaling_mode: viewport_height(zoom),
                ..OrthographicProjection::default_2d()
            }),
            MainCamera {
                responsiveness: tunables.camera_responsiveness,
            },
            CameraZoom { current: zoom },
            FireflyConfig::default(),
            Transform::from_xyz(0.0, 0.0, 999.0),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands.insert_resource(MainCameraEntity(Some(e)));
}

fn follow_player(
    time: Res<Time>,
    player_e: Res<PlayerEntity>,
    cam_e: Res<MainCameraEntity>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let (Some(player), Some(cam)) = (player_e.0, cam_e.0) else {
        return;
    };
    let Ok(tf_player) = q_player.get(player) else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.get_mut(cam) else {
        return;
    };

    let alpha = smoothing::blend_factor(main_cam.responsiveness, time.delta_secs());
    let pos = tf_cam
        .translation
        .truncate()
        .lerp(tf_player.translation.truncate(), alpha);
    tf_cam.translation.x = pos.x;
    tf_cam.translation.y = pos.y;
}

/// Blend the zoom toward the followed gun's target. Idle guns target the initial zoom,
/// so the camera settles back after a stop.
fn smooth_camera_zoom(
    time: Res<Time>,
    player_e: Res<PlayerEntity>,
    cam_e: Res<MainCameraEntity>,
    q_guns: Query<&Gun>,
    mut q_zoom: Query<&mut CameraZoom>,
) {
    let (Some(player), Some(cam)) = (player_e.0, cam_e.0) else {
        return;
    };
    let Ok(gun) = q_guns.get(player) else {
        return;
    };
    let Ok(mut zoom) = q_zoom.get_mut(cam) else {
        return;
    };

    let next = smoothing::approach(
        zoom.current,
        gun.zoom_target(),
        gun.tuning().camera_zoom_weight,
        time.delta_secs(),
    );
    if next != zoom.current {
        zoom.current = next;
    }
}

fn apply_camera_zoom(mut q: Query<(&CameraZoom, &mut Projection), Changed<CameraZoom>>) {
    for (zoom, mut projection) in &mut q {
        if let Projection::Orthographic(ortho) = &mut *projection {
            ortho.scaling_mode = viewport_height(zoom.current);
        }
    }
}
