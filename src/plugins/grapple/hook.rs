//! Hook systems.
//!
//! `commit_hook_bodies` is the single writer of the hook's physics and visual components.
//! Everything else only changes the `Hook` state and, for a launch, its transform and
//! velocity.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

use super::components::{Gun, Hook, HookPhase};
use super::gun::stop_grappling;
use super::tether::Tether;

#[inline]
pub fn active_hook_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Hook, [Layer::World])
}

/// Empty filters: a retracted or anchored hook collides with nothing.
#[inline]
pub fn inactive_hook_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Hook, [] as [Layer; 0])
}

/// Stop an unanchored hook once it reaches its gun's max distance.
pub fn enforce_leash(
    mut q_hooks: Query<(Entity, &mut Hook, &Transform), Without<Gun>>,
    mut q_guns: Query<(&mut Gun, &Transform, &mut Tether), Without<Hook>>,
) {
    for (hook_e, mut hook, hook_tf) in &mut q_hooks {
        if !hook.released() {
            continue;
        }
        let Ok((mut gun, gun_tf, mut tether)) = q_guns.get_mut(hook.gun()) else {
            continue;
        };
        if gun.hooked() {
            continue;
        }

        let distance = gun_tf
            .translation
            .truncate()
            .distance(hook_tf.translation.truncate());
        if distance >= gun.max_dist() {
            debug!("hook {hook_e:?} ran out of tether at {distance:.2}");
            stop_grappling(&mut gun, &mut hook, &mut tether);
        }
    }
}

/// Keep anchored hooks glued to their parent's transform.
pub fn follow_anchor_parents(
    mut q_hooks: Query<(&Hook, &mut Transform)>,
    q_parents: Query<&GlobalTransform, Without<Hook>>,
) {
    for (hook, mut tf) in &mut q_hooks {
        if hook.phase() != HookPhase::Anchored {
            continue;
        }
        let Some(parent) = hook.anchor_parent() else {
            continue;
        };
        let Ok(parent_tf) = q_parents.get(parent) else {
            continue;
        };

        let world = parent_tf.transform_point(hook.anchor_offset().extend(0.0));
        if tf.translation.truncate() != world.truncate() {
            tf.translation.x = world.x;
            tf.translation.y = world.y;
        }
    }
}

/// Write the derived simulation/visibility state of changed hooks.
pub fn commit_hook_bodies(
    mut q: Query<
        (
            &Hook,
            &mut RigidBody,
            &mut CollisionLayers,
            &mut LinearVelocity,
            &mut Visibility,
            &mut Sprite,
        ),
        Changed<Hook>,
    >,
) {
    for (hook, mut body, mut layers, mut vel, mut vis, mut sprite) in &mut q {
        let simulated = hook.simulated();

        let wanted = if simulated {
            RigidBody::Dynamic
        } else {
            RigidBody::Kinematic
        };
        if *body != wanted {
            *body = wanted;
        }

        *layers = if simulated {
            active_hook_layers()
        } else {
            inactive_hook_layers()
        };
        if !simulated {
            vel.0 = Vec2::ZERO;
        }

        *vis = if hook.visible() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        sprite.color = hook.visual().color();
    }
}
