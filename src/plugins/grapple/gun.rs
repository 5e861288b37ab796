//! Gun systems: launch, stop, reel/swing and zoom feedback.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Gun, Hook, HookLaunch};
use super::input::GrappleInput;
use super::messages::{GrappleForce, StopGrapple};
use super::tether::Tether;

/// Put gun, hook and tether back to idle. Safe from any state.
pub fn stop_grappling(gun: &mut Gun, hook: &mut Hook, tether: &mut Tether) {
    gun.reset();
    hook.retract();
    tether.release();
}

/// Reset the previous shot, then fire the hook from `gun_pos` toward `aim`.
///
/// A missing aim is treated as aiming at the gun itself: the direction collapses to zero
/// and the hook only inherits the gun's velocity.
pub fn launch(
    gun: &mut Gun,
    hook: &mut Hook,
    tether: &mut Tether,
    gun_pos: Vec2,
    gun_velocity: Vec2,
    aim: Option<Vec2>,
) -> HookLaunch {
    stop_grappling(gun, hook, tether);

    let target = aim.unwrap_or(gun_pos);
    let direction = (target - gun_pos).normalize_or_zero();
    hook.shoot(gun_pos, gun_velocity, direction * gun.tuning().hook_force)
}

pub fn handle_grapple_input(
    input: Res<GrappleInput>,
    mut q_guns: Query<(Entity, &mut Gun, &Transform, &LinearVelocity, &mut Tether), Without<Hook>>,
    mut q_hooks: Query<(&mut Hook, &mut Transform, &mut LinearVelocity), Without<Gun>>,
    mut forces: MessageWriter<GrappleForce>,
) {
    if !input.grapple_triggered && !input.stop_triggered {
        return;
    }

    for (gun_e, mut gun, gun_tf, gun_vel, mut tether) in &mut q_guns {
        let hook_e = gun.hook_entity();
        let Ok((mut hook, mut hook_tf, mut hook_vel)) = q_hooks.get_mut(hook_e) else {
            debug!("gun {gun_e:?} has no hook");
            continue;
        };

        if input.stop_triggered {
            stop_grappling(&mut gun, &mut hook, &mut tether);
        }

        if input.grapple_triggered {
            let gun_pos = gun_tf.translation.truncate();
            let shot = launch(
                &mut gun,
                &mut hook,
                &mut tether,
                gun_pos,
                gun_vel.0,
                input.pointer_world,
            );
            hook_tf.translation = shot.position.extend(hook_tf.translation.z);
            hook_vel.0 = shot.velocity;
            if shot.force != Vec2::ZERO {
                forces.write(GrappleForce {
                    body: hook_e,
                    force: shot.force,
                });
            }
            debug!("gun {gun_e:?} fired hook with force {:?}", shot.force);
        }
    }
}

/// The stop entry point for respawn, zones and anything else outside the grapple.
pub fn apply_stop_requests(
    mut requests: MessageReader<StopGrapple>,
    mut q_guns: Query<(&mut Gun, &mut Tether), Without<Hook>>,
    mut q_hooks: Query<&mut Hook, Without<Gun>>,
) {
    for req in requests.read() {
        let Ok((mut gun, mut tether)) = q_guns.get_mut(req.gun) else {
            debug!("stop requested for {:?}, which is not a gun", req.gun);
            continue;
        };
        let Ok(mut hook) = q_hooks.get_mut(gun.hook_entity()) else {
            debug!("gun {:?} has no hook", req.gun);
            continue;
        };
        stop_grappling(&mut gun, &mut hook, &mut tether);
    }
}

/// Per-frame tether work while hooked: anchor refresh, reel, swing, broken joint stop.
pub fn update_tethers(
    time: Res<Time>,
    input: Res<GrappleInput>,
    mut q_guns: Query<(Entity, &mut Gun, &Transform, &mut Tether), Without<Hook>>,
    mut q_hooks: Query<(&mut Hook, &Transform), Without<Gun>>,
    q_disabled: Query<(), With<JointDisabled>>,
    mut forces: MessageWriter<GrappleForce>,
) {
    let dt = time.delta_secs();

    for (gun_e, mut gun, gun_tf, mut tether) in &mut q_guns {
        if !gun.hooked() {
            continue;
        }
        let Ok((mut hook, hook_tf)) = q_hooks.get_mut(gun.hook_entity()) else {
            continue;
        };

        if tether.joint().is_some_and(|joint| q_disabled.contains(joint)) {
            info!("tether of gun {gun_e:?} broke");
            stop_grappling(&mut gun, &mut hook, &mut tether);
            continue;
        }

        let gun_pos = gun_tf.translation.truncate();
        let hook_pos = hook_tf.translation.truncate();

        tether.connected_anchor = hook.tether_anchor(tether.connected_body, hook_pos);

        gun.reel(input.reel_axis, dt, &mut tether);

        if let Some(force) = gun.swing_force(input.swing_axis, dt, gun_pos, hook_pos) {
            forces.write(GrappleForce { body: gun_e, force });
        }
    }
}

/// Camera zoom target from the current hook extension. Runs whether hooked or not.
pub fn update_zoom_targets(
    mut q_guns: Query<(&mut Gun, &Transform), Without<Hook>>,
    q_hooks: Query<(&Hook, &Transform), Without<Gun>>,
) {
    for (mut gun, gun_tf) in &mut q_guns {
        let extension = q_hooks
            .get(gun.hook_entity())
            .ok()
            .filter(|(hook, _)| hook.released())
            .map(|(_, hook_tf)| gun_tf.translation.truncate().distance(hook_tf.translation.truncate()));
        gun.retarget_zoom(extension);
    }
}
