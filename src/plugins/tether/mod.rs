//! Tether plugin (render-only): a line from each gun to its released hook.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::grapple::{Gun, Hook};

pub fn plugin(app: &mut App) {
    app.add_systems(
        PostUpdate,
        draw_tethers
            .after(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

fn draw_tethers(
    mut gizmos: Gizmos,
    q_guns: Query<(&Gun, &GlobalTransform)>,
    q_hooks: Query<(&Hook, &GlobalTransform)>,
) {
    for (gun, gun_tf) in &q_guns {
        let Ok((hook, hook_tf)) = q_hooks.get(gun.hook_entity()) else {
            continue;
        };
        if !hook.released() {
            continue;
        }
        gizmos.line_2d(
            gun_tf.translation().truncate(),
            hook_tf.translation().truncate(),
            hook.visual().color(),
        );
    }
}
