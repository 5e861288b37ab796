//! Lighting plugin (Firefly) (render-only).
//!
//! One light rides on the hook while it is out and falls back to the player when it is
//! not. Its tint follows the hook's visual state.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::grapple::{Gun, Hook, HookVisual};
use crate::plugins::player::{Player, PlayerEntity};

#[derive(Component)]
pub struct HookLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(
            PostUpdate,
            follow_hook_light
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("HookLight"),
        HookLight,
        PointLight2d {
            color: HookVisual::Unhooked.color(),
            radius: 12.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_hook_light(
    player_e: Res<PlayerEntity>,
    q_player: Query<(&Transform, Option<&Gun>), (With<Player>, Without<HookLight>)>,
    q_hooks: Query<(&Hook, &Transform), (Without<Player>, Without<HookLight>)>,
    mut q_light: Query<(&mut Transform, &mut PointLight2d), With<HookLight>>,
) {
    let Some(player) = player_e.0 else {
        return;
    };
    let Ok((tf_player, gun)) = q_player.get(player) else {
        return;
    };
    let Ok((mut tf_light, mut light)) = q_light.single_mut() else {
        return;
    };

    let released = gun
        .and_then(|gun| q_hooks.get(gun.hook_entity()).ok())
        .filter(|(hook, _)| hook.released());

    let (target, color) = match released {
        Some((hook, tf_hook)) => (tf_hook.translation, hook.visual().color()),
        None => (tf_player.translation, HookVisual::Unhooked.color()),
    };

    tf_light.translation.x = target.x;
    tf_light.translation.y = target.y;
    if light.color != color {
        light.color = color;
    }
}
