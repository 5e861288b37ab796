//! Per-frame input snapshot.
//!
//! Raw devices are read in exactly one place. Everything downstream consumes the
//! `GrappleInput` resource, which headless tests can write directly.

use bevy::prelude::*;

use crate::plugins::camera::MainCamera;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct GrappleInput {
    pub grapple_triggered: bool,
    pub stop_triggered: bool,
    /// +1 reels in, -1 reels out.
    pub reel_axis: f32,
    /// +1 pushes right while hanging below the hook, -1 left.
    pub swing_axis: f32,
    /// Cursor in world space, `None` when it is outside the window.
    pub pointer_world: Option<Vec2>,
}

#[inline]
fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

pub fn gather_grapple_input(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut input: ResMut<GrappleInput>,
) {
    let mouse_just = |b: MouseButton| mouse.as_ref().is_some_and(|m| m.just_pressed(b));
    let key_just = |k: KeyCode| keys.as_ref().is_some_and(|i| i.just_pressed(k));
    let key_held = |k: KeyCode| keys.as_ref().is_some_and(|i| i.pressed(k));

    input.grapple_triggered = mouse_just(MouseButton::Left);
    input.stop_triggered = mouse_just(MouseButton::Right) || key_just(KeyCode::Space);
    input.reel_axis = axis(key_held(KeyCode::KeyS), key_held(KeyCode::KeyW));
    input.swing_axis = axis(key_held(KeyCode::KeyA), key_held(KeyCode::KeyD));

    input.pointer_world = (|| {
        let window = windows.single().ok()?;
        let cursor = window.cursor_position()?;
        let (camera, camera_tf) = q_camera.single().ok()?;
        camera.viewport_to_world_2d(camera_tf, cursor).ok()
    })();
}
