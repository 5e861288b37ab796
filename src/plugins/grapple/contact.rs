//! Hook collision handling.
//!
//! ```text
//! CollisionStart (avian) --emit_hook_contacts--> HookContact --resolve_hook_contacts--> anchor
//! ```
//!
//! Only the first contact that passes the eligibility filter anchors a hook: once anchored
//! the hook is no longer `InFlight` and every later contact for it is ignored.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Gun, Hook, HookPhase};
use super::eligibility::SurfaceEligibility;
use super::messages::HookContact;
use super::tether::Tether;

/// Translate avian collision starts into `HookContact`s for in-flight hooks.
pub fn emit_hook_contacts(
    mut started: MessageReader<CollisionStart>,
    q_hooks: Query<(&Hook, &Position)>,
    q_colliders: Query<(&Collider, &Position, &Rotation), Without<Hook>>,
    mut writer: MessageWriter<HookContact>,
) {
    for ev in started.read() {
        let (hook_e, other, other_body) = if q_hooks.contains(ev.collider1) {
            (ev.collider1, ev.collider2, ev.body2)
        } else if q_hooks.contains(ev.collider2) {
            (ev.collider2, ev.collider1, ev.body1)
        } else {
            continue;
        };

        let Ok((hook, hook_pos)) = q_hooks.get(hook_e) else {
            continue;
        };
        if hook.phase() != HookPhase::InFlight {
            continue;
        }

        let Ok((collider, pos, rot)) = q_colliders.get(other) else {
            debug!("hook {hook_e:?} touched {other:?}, which has no collider pose");
            continue;
        };

        let (point, _inside) = collider.project_point(*pos, *rot, hook_pos.0, true);
        let normal = (point - hook_pos.0).normalize_or_zero();

        writer.write(HookContact {
            hook: hook_e,
            collider: other,
            body: other_body,
            point,
            normal,
        });
    }
}

/// Anchor in-flight hooks on eligible contacts and arm their gun's tether.
pub fn resolve_hook_contacts(
    mut contacts: MessageReader<HookContact>,
    mut q_hooks: Query<(&mut Hook, &Transform), Without<Gun>>,
    mut q_guns: Query<(&mut Gun, &Transform, &mut Tether), Without<Hook>>,
    q_surfaces: Query<&SurfaceEligibility>,
    q_frames: Query<&GlobalTransform>,
) {
    for contact in contacts.read() {
        let Ok((mut hook, hook_tf)) = q_hooks.get_mut(contact.hook) else {
            continue;
        };
        if hook.phase() != HookPhase::InFlight {
            continue;
        }
        let Ok((mut gun, gun_tf, mut tether)) = q_guns.get_mut(hook.gun()) else {
            debug!("hook {:?} points at a missing gun", contact.hook);
            continue;
        };

        let surface = [Some(contact.collider), contact.body]
            .into_iter()
            .flatten()
            .find_map(|e| q_surfaces.get(e).ok());
        if let Some(surface) = surface {
            // Sample just past the contact so a point on a cell edge classifies as the
            // struck cell.
            let probe = contact.point + contact.normal * gun.tuning().probe_depth;
            if !surface.can_hook_at(probe) {
                debug!("hook {:?} hit a non-hookable tile at {probe}", contact.hook);
                continue;
            }
        }

        let hook_pos = hook_tf.translation.truncate();
        let parent = contact.body.unwrap_or(contact.collider);
        let offset = q_frames.get(parent).map_or(hook_pos, |frame| {
            frame
                .affine()
                .inverse()
                .transform_point3(hook_tf.translation)
                .truncate()
        });
        hook.anchor(parent, offset);

        let distance = gun_tf.translation.truncate().distance(hook_pos);
        gun.hook_onto(distance, contact.body, &mut tether);
        tether.connected_anchor = hook.tether_anchor(contact.body, hook_pos);

        info!(
            "hook {:?} anchored to {parent:?} at {hook_pos}, tether {:.2}",
            contact.hook, tether.distance
        );
    }
}
