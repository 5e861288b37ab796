//! Physics plugin: avian setup.
//!
//! The grapple drives avian directly: its tether is a `DistanceJoint` and swing and
//! launch go through `Forces` (see `plugins::grapple::tether`).

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let tunables = app.world().resource::<Tunables>().clone();
    app.add_plugins(PhysicsPlugins::default().with_length_unit(tunables.length_unit));
    app.insert_resource(Gravity(Vec2::NEG_Y * tunables.gravity));
}
