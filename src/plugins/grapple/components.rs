//! Gun and hook state.
//!
//! Both live on separate entities and point at each other through plain `Entity`
//! handles set up at spawn. Neither owns the other.

use bevy::prelude::*;

use crate::common::smoothing;
use crate::common::tunables::{GrappleTuning, TuningError};

use super::tether::Tether;

// -----------------------------------------------------------------------------
// Gun
// -----------------------------------------------------------------------------

/// Grapple gun carried by a player body.
///
/// The gun is the only writer of the `Tether` on its entity.
#[derive(Component, Debug, Clone)]
pub struct Gun {
    hook: Entity,
    tuning: GrappleTuning,
    hooked: bool,
    reel_direction: f32,
    zoom_target: f32,
}

impl Gun {
    pub fn new(hook: Entity, tuning: GrappleTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            hook,
            tuning,
            hooked: false,
            reel_direction: 0.0,
            zoom_target: tuning.camera_initial_zoom,
        })
    }

    #[inline]
    pub fn hook_entity(&self) -> Entity {
        self.hook
    }

    #[inline]
    pub fn tuning(&self) -> &GrappleTuning {
        &self.tuning
    }

    /// True once an anchor has been confirmed.
    #[inline]
    pub fn hooked(&self) -> bool {
        self.hooked
    }

    #[inline]
    pub fn max_dist(&self) -> f32 {
        self.tuning.max_distance
    }

    #[inline]
    pub fn reel_direction(&self) -> f32 {
        self.reel_direction
    }

    #[inline]
    pub fn zoom_target(&self) -> f32 {
        self.zoom_target
    }

    /// Confirm an anchor: arm the tether at `distance` (clamped to the tether range)
    /// against `body`, or against a fixed point when `body` is `None`.
    pub fn hook_onto(&mut self, distance: f32, body: Option<Entity>, tether: &mut Tether) {
        self.hooked = true;
        self.reel_direction = 0.0;

        tether.enabled = true;
        tether.distance = distance.clamp(self.tuning.min_distance, self.tuning.max_distance);
        tether.connected_body = body;
    }

    /// Smooth the reel direction toward `input` and shorten (positive) or lengthen
    /// (negative) the tether accordingly.
    pub fn reel(&mut self, input: f32, dt: f32, tether: &mut Tether) {
        let input = input.clamp(-1.0, 1.0);
        self.reel_direction = smoothing::approach(
            self.reel_direction,
            input,
            self.tuning.reel_weight,
            dt,
        );

        tether.distance -= self.reel_direction * self.tuning.reel_speed * dt;
        tether.distance = tether
            .distance
            .clamp(self.tuning.min_distance, self.tuning.max_distance);
    }

    /// Tangential force for a swing input, perpendicular (-90°) to gun → hook.
    ///
    /// `None` for zero input or when gun and hook coincide.
    pub fn swing_force(&self, input: f32, dt: f32, gun_pos: Vec2, hook_pos: Vec2) -> Option<Vec2> {
        if input == 0.0 {
            return None;
        }
        let to_hook = (hook_pos - gun_pos).normalize_or_zero();
        if to_hook == Vec2::ZERO {
            return None;
        }
        let tangent = Vec2::new(to_hook.y, -to_hook.x);
        Some(tangent * input.clamp(-1.0, 1.0) * self.tuning.swing_force * dt)
    }

    /// Camera target for the current hook extension (`None` when the hook is not released).
    pub fn retarget_zoom(&mut self, hook_distance: Option<f32>) {
        let initial = self.tuning.camera_initial_zoom;
        self.zoom_target = match hook_distance {
            Some(d) => (d * self.tuning.camera_zoom_margin).clamp(initial, self.tuning.camera_max_zoom),
            None => initial,
        };
    }

    pub(super) fn reset(&mut self) {
        self.hooked = false;
        self.reel_direction = 0.0;
        self.zoom_target = self.tuning.camera_initial_zoom;
    }
}

// -----------------------------------------------------------------------------
// Hook
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookPhase {
    /// Not released: hidden, not simulated.
    #[default]
    Idle,
    /// Released and simulated, no anchor yet.
    InFlight,
    /// Released, frozen and riding on its anchor parent.
    Anchored,
}

/// Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookVisual {
    #[default]
    Unhooked,
    Hooked,
}

impl HookVisual {
    pub fn color(self) -> Color {
        match self {
            Self::Unhooked => Color::srgb(0.95, 0.8, 0.3),
            Self::Hooked => Color::srgb(0.35, 0.95, 0.55),
        }
    }
}

/// Where a launched hook starts, the velocity it inherits and the force that sends it off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookLaunch {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Applied for the hook's first physics step.
    pub force: Vec2,
}

/// The projectile end of the tether. Created once per gun and reused for every shot.
///
/// Simulation and visibility are derived from the phase, so `released() == false`
/// always means hidden and not simulated.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Hook {
    gun: Entity,
    phase: HookPhase,
    visual: HookVisual,
    anchor_parent: Option<Entity>,
    anchor_offset: Vec2,
}

impl Hook {
    pub fn new(gun: Entity) -> Self {
        Self {
            gun,
            phase: HookPhase::Idle,
            visual: HookVisual::Unhooked,
            anchor_parent: None,
            anchor_offset: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn gun(&self) -> Entity {
        self.gun
    }

    #[inline]
    pub fn phase(&self) -> HookPhase {
        self.phase
    }

    #[inline]
    pub fn released(&self) -> bool {
        self.phase != HookPhase::Idle
    }

    #[inline]
    pub fn simulated(&self) -> bool {
        self.phase == HookPhase::InFlight
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.released()
    }

    #[inline]
    pub fn visual(&self) -> HookVisual {
        self.visual
    }

    #[inline]
    pub fn anchor_parent(&self) -> Option<Entity> {
        self.anchor_parent
    }

    /// Hook position in the anchor parent's local space.
    #[inline]
    pub fn anchor_offset(&self) -> Vec2 {
        self.anchor_offset
    }

    /// Any phase → `InFlight`.
    pub fn shoot(&mut self, position: Vec2, inherited: Vec2, force: Vec2) -> HookLaunch {
        self.anchor_parent = None;
        self.anchor_offset = Vec2::ZERO;
        self.visual = HookVisual::Unhooked;
        self.phase = HookPhase::InFlight;

        HookLaunch {
            position,
            velocity: inherited,
            force,
        }
    }

    /// `InFlight` → `Anchored`, riding on `parent` at `offset` (parent-local).
    pub fn anchor(&mut self, parent: Entity, offset: Vec2) {
        self.phase = HookPhase::Anchored;
        self.visual = HookVisual::Hooked;
        self.anchor_parent = Some(parent);
        self.anchor_offset = offset;
    }

    /// Any phase → `Idle`. Idempotent.
    pub fn retract(&mut self) {
        self.phase = HookPhase::Idle;
        self.anchor_parent = None;
        self.anchor_offset = Vec2::ZERO;
    }

    /// Tether anchor for the current attachment: parent-local when the tether is
    /// connected to a body, world space otherwise.
    pub fn tether_anchor(&self, connected_body: Option<Entity>, world_position: Vec2) -> Vec2 {
        match connected_body {
            Some(_) => self.anchor_offset,
            None => world_position,
        }
    }
}
