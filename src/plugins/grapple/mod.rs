//! Grapple plugin: hook lifecycle, tether reel/swing and terrain eligibility.
//!
//! # Data flow
//! ```text
//!   Update (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  gather_grapple_input     devices -> GrappleInput snapshot                 │
//!│  handle_grapple_input     stop / reset + launch (Hook: * -> InFlight)      │
//!│  enforce_leash            InFlight past max distance -> stop               │
//!│  apply_stop_requests      StopGrapple messages -> stop                     │
//!│  follow_anchor_parents    Anchored hook rides its parent                   │
//!│  detect_broken_tethers    overloaded or orphaned joint -> JointDisabled    │
//!│  update_tethers           anchor refresh, reel, swing, broken tether stop  │
//!│  update_zoom_targets      hook extension -> Gun zoom target                │
//!│  commit_hook_bodies       Hook phase -> RigidBody/layers/visibility        │
//!│  commit_tether_joints     Tether -> DistanceJoint length, JointDisabled    │
//!│  apply_grapple_forces     GrappleForce messages -> avian Forces            │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  avian step -> CollisionStart                                              │
//!│  emit_hook_contacts       CollisionStart -> HookContact                    │
//!│  resolve_hook_contacts    eligibility filter, InFlight -> Anchored,        │
//!│                           Gun::hook_onto arms the Tether                   │
//!│  commit_hook_bodies       freeze the anchored hook before the next step    │
//!│  commit_tether_joints     arm the joint before the next step               │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The contact path fully arms the joint, so it does not matter whether the next
//! `update_tethers` runs in the same frame or the following one. Forces written in
//! `Update` act on the next physics step only.

pub mod components;
pub mod contact;
pub mod eligibility;
pub mod gun;
pub mod hook;
pub mod input;
pub mod messages;
pub mod tether;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub use components::{Gun, Hook, HookPhase, HookVisual};
pub use messages::{GrappleForce, HookContact, StopGrapple};
pub use tether::{Tether, TetherJoint};

pub struct GrapplePlugin;

impl Plugin for GrapplePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<input::GrappleInput>()
            .add_message::<HookContact>()
            .add_message::<StopGrapple>()
            .add_message::<GrappleForce>();

        // Headless apps have no input devices; tests write GrappleInput themselves.
        app.add_systems(
            PreUpdate,
            input::gather_grapple_input
                .run_if(resource_exists::<ButtonInput<MouseButton>>)
                .after(bevy::input::InputSystems),
        );

        app.add_systems(
            Update,
            (
                eligibility::materialize_tile_catalogs,
                gun::handle_grapple_input,
                hook::enforce_leash,
                gun::apply_stop_requests,
                hook::follow_anchor_parents,
                tether::detect_broken_tethers,
                gun::update_tethers,
                gun::update_zoom_targets,
                hook::commit_hook_bodies,
                tether::commit_tether_joints,
                tether::apply_grapple_forces,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                contact::emit_hook_contacts,
                contact::resolve_hook_contacts,
                hook::commit_hook_bodies,
                tether::commit_tether_joints,
            )
                .chain()
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
