//! Tether: the gun's view of its distance joint, and the glue to avian.
//!
//! ```text
//! Gun (sole writer) -> Tether mirror --commit_tether_joints--> avian DistanceJoint
//! avian JointForces --detect_broken_tethers--> JointDisabled --update_tethers--> stop
//! GrappleForce messages --apply_grapple_forces--> avian Forces
//! ```
//!
//! The joint links the player to its hook. An anchored hook rides the struck body, so
//! the joint solves against the anchor without body-local joint anchors. The joint
//! entity is created with the player and reused for every shot; it is switched on and
//! off with `JointDisabled`.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::messages::GrappleForce;

/// Live configuration of a gun's tether, mirrored into its joint.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Tether {
    pub enabled: bool,
    pub distance: f32,
    /// Body that was struck, `None` for a fixed point.
    pub connected_body: Option<Entity>,
    /// Anchor in `connected_body`'s local space, or in world space without a body.
    pub connected_anchor: Vec2,
    joint: Option<Entity>,
}

impl Default for Tether {
    fn default() -> Self {
        Self {
            enabled: false,
            distance: 0.0,
            connected_body: None,
            connected_anchor: Vec2::ZERO,
            joint: None,
        }
    }
}

impl Tether {
    pub fn with_joint(mut self, joint: Entity) -> Self {
        self.joint = Some(joint);
        self
    }

    #[inline]
    pub fn joint(&self) -> Option<Entity> {
        self.joint
    }

    /// Disable and forget the connected body.
    pub fn release(&mut self) {
        self.enabled = false;
        self.connected_body = None;
    }
}

/// Marks the joint entity driven by a gun's `Tether`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TetherJoint {
    pub gun: Entity,
    pub hook: Entity,
    /// Joint force (N) past which the joint is disabled.
    pub break_force: Option<f32>,
    length: f32,
}

impl TetherJoint {
    pub fn new(gun: Entity, hook: Entity, break_force: Option<f32>) -> Self {
        Self {
            gun,
            hook,
            break_force,
            length: 0.0,
        }
    }

    /// Length last written to the joint.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }
}

/// A disabled rod joint between gun and hook, ready to be armed.
pub fn tether_joint_bundle(gun: Entity, hook: Entity, break_force: Option<f32>) -> impl Bundle {
    (
        Name::new("Tether"),
        TetherJoint::new(gun, hook, break_force),
        DistanceJoint::new(gun, hook),
        JointForces::new(),
        JointDisabled,
    )
}

/// Disable joints whose reaction force exceeds their limit, or whose struck body is gone.
pub fn detect_broken_tethers(
    mut commands: Commands,
    q_joints: Query<(Entity, &TetherJoint, &JointForces), Without<JointDisabled>>,
    q_tethers: Query<&Tether>,
    q_alive: Query<()>,
) {
    for (joint_e, joint, forces) in &q_joints {
        let Ok(tether) = q_tethers.get(joint.gun) else {
            continue;
        };
        if !tether.enabled {
            continue;
        }

        let force = forces.force().length();
        let overloaded = joint.break_force.is_some_and(|limit| force > limit);
        let orphaned = tether
            .connected_body
            .is_some_and(|body| !q_alive.contains(body));

        if overloaded || orphaned {
            debug!(
                "tether joint {joint_e:?} disabled (force {force:.1}, body lost: {orphaned})"
            );
            commands.entity(joint_e).insert(JointDisabled);
        }
    }
}

/// Write changed tethers into their joints.
pub fn commit_tether_joints(
    mut commands: Commands,
    q_tethers: Query<&Tether, Changed<Tether>>,
    mut q_joints: Query<(
        &mut TetherJoint,
        &mut DistanceJoint,
        &mut JointForces,
        Has<JointDisabled>,
    )>,
) {
    for tether in &q_tethers {
        let Some(joint_e) = tether.joint else {
            continue;
        };
        let Ok((mut marker, mut joint, mut forces, disabled)) = q_joints.get_mut(joint_e) else {
            debug!("tether joint {joint_e:?} is missing");
            continue;
        };

        if !tether.enabled {
            if !disabled {
                commands.entity(joint_e).insert(JointDisabled);
            }
            continue;
        }

        if marker.length != tether.distance {
            marker.length = tether.distance;
            joint.limits = DistanceLimit::new(tether.distance, tether.distance);
        }
        if disabled {
            // Forces from before the last break must not break the new tether.
            *forces = JointForces::new();
            commands.entity(joint_e).remove::<JointDisabled>();
        }
    }
}

pub fn apply_grapple_forces(mut requests: MessageReader<GrappleForce>, mut q_bodies: Query<Forces>) {
    for req in requests.read() {
        let Ok(mut forces) = q_bodies.get_mut(req.body) else {
            debug!("force requested for {:?}, which is not a rigid body", req.body);
            continue;
        };
        forces.apply_force(req.force);
    }
}
