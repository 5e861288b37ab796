//! Grapple messages.

use bevy::prelude::*;

/// A released hook touched a collider.
///
/// `point` is the struck surface point closest to the hook, `normal` the unit direction
/// from the hook toward it (into the surface), zero when the hook already overlaps.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct HookContact {
    pub hook: Entity,
    pub collider: Entity,
    pub body: Option<Entity>,
    pub point: Vec2,
    pub normal: Vec2,
}

/// Reset a gun to idle. Safe from any state, any number of times.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StopGrapple {
    pub gun: Entity,
}

/// Force (N) for a rigid body's next physics step.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct GrappleForce {
    pub body: Entity,
    pub force: Vec2,
}
