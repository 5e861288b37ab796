//! Core plugin: shared resources and global settings.
//!
//! Must run before any plugin that reads `Tunables` at build time (physics).

use crate::common::tunables::Tunables;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    // Keep tunables inserted by the embedding app (tests, tools).
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    if let Err(err) = app.world().resource::<Tunables>().grapple.validate() {
        warn!("grapple tuning rejected, guns will not be armed: {err}");
    }
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}
