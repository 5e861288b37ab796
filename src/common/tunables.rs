//! Tunable gameplay constants.
//!
//! World units are meters. The camera zoom values are orthographic half-heights.

use bevy::prelude::*;
use thiserror::Error;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Typical object size handed to the physics solver.
    pub length_unit: f32,
    pub gravity: f32,
    pub player_mass: f32,
    /// Camera follow speed (1/s).
    pub camera_responsiveness: f32,
    pub grapple: GrappleTuning,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            length_unit: 1.0,
            gravity: 9.8,
            player_mass: 1.0,
            camera_responsiveness: 5.0,
            grapple: GrappleTuning::default(),
        }
    }
}

/// Per-gun grapple tuning. Every `Gun` owns a validated copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrappleTuning {
    /// Shortest tether length reachable by reeling in.
    pub min_distance: f32,
    /// Longest tether length, also the leash for an unanchored hook.
    pub max_distance: f32,
    /// How quickly the reel direction follows the reel input (1/s).
    pub reel_weight: f32,
    /// Tether length change per second at full reel.
    pub reel_speed: f32,
    pub swing_force: f32,
    /// Launch force applied to the hook for one physics step.
    pub hook_force: f32,
    pub hook_mass: f32,
    /// How far past a terrain contact the eligibility lookup samples.
    pub probe_depth: f32,
    /// Joint force (N) at which the tether snaps. `None` never snaps.
    pub break_force: Option<f32>,
    pub camera_initial_zoom: f32,
    pub camera_max_zoom: f32,
    pub camera_zoom_margin: f32,
    pub camera_zoom_weight: f32,
}

impl Default for GrappleTuning {
    fn default() -> Self {
        Self {
            min_distance: 0.7,
            max_distance: 32.0,
            reel_weight: 2.0,
            reel_speed: 4.0,
            swing_force: 7.0,
            hook_force: 4.0,
            hook_mass: 0.004,
            probe_depth: 0.1,
            break_force: Some(400.0),
            camera_initial_zoom: 8.0,
            camera_max_zoom: 32.0,
            camera_zoom_margin: 1.2,
            camera_zoom_weight: 1.0,
        }
    }
}

impl GrappleTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("reel_weight", self.reel_weight),
            ("reel_speed", self.reel_speed),
            ("swing_force", self.swing_force),
            ("hook_force", self.hook_force),
            ("hook_mass", self.hook_mass),
            ("probe_depth", self.probe_depth),
            ("camera_initial_zoom", self.camera_initial_zoom),
            ("camera_max_zoom", self.camera_max_zoom),
            ("camera_zoom_margin", self.camera_zoom_margin),
            ("camera_zoom_weight", self.camera_zoom_weight),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NonFinite(name));
        }
        if self.min_distance < 0.0 || self.min_distance > self.max_distance {
            return Err(TuningError::DistanceRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        if self.hook_mass <= 0.0 {
            return Err(TuningError::HookMass(self.hook_mass));
        }
        if self.camera_initial_zoom <= 0.0 || self.camera_initial_zoom > self.camera_max_zoom {
            return Err(TuningError::ZoomRange {
                initial: self.camera_initial_zoom,
                max: self.camera_max_zoom,
            });
        }
        if let Some(force) = self.break_force {
            if !(force.is_finite() && force > 0.0) {
                return Err(TuningError::BreakForce(force));
            }
        }
        Ok(())
    }
}

/// A grapple tuning that cannot arm a gun.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TuningError {
    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("tether range [{min}, {max}] is empty or negative")]
    DistanceRange { min: f32, max: f32 },

    #[error("hook mass {0} must be positive")]
    HookMass(f32),

    #[error("initial zoom {initial} must be positive and at most max zoom {max}")]
    ZoomRange { initial: f32, max: f32 },

    #[error("break force {0} must be positive")]
    BreakForce(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        assert_eq!(GrappleTuning::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_distance_range() {
        let tuning = GrappleTuning { min_distance: 5.0, max_distance: 1.0, ..default() };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::DistanceRange { min: 5.0, max: 1.0 })
        );
    }

    #[test]
    fn rejects_massless_hook_and_bad_zoom() {
        let tuning = GrappleTuning { hook_mass: 0.0, ..default() };
        assert_eq!(tuning.validate(), Err(TuningError::HookMass(0.0)));

        let tuning = GrappleTuning { camera_initial_zoom: 40.0, ..default() };
        assert!(matches!(tuning.validate(), Err(TuningError::ZoomRange { .. })));
    }

    #[test]
    fn rejects_nan() {
        let tuning = GrappleTuning { reel_speed: f32::NAN, ..default() };
        assert_eq!(tuning.validate(), Err(TuningError::NonFinite("reel_speed")));
        assert_eq!(
            TuningError::NonFinite("reel_speed").to_string(),
            "reel_speed must be finite"
        );
    }

    #[test]
    fn rejects_non_positive_break_force() {
        let tuning = GrappleTuning { break_force: Some(0.0), ..default() };
        assert_eq!(tuning.validate(), Err(TuningError::BreakForce(0.0)));
        assert_eq!(
            TuningError::BreakForce(0.0).to_string(),
            "break force 0 must be positive"
        );

        let unbreakable = GrappleTuning { break_force: None, ..default() };
        assert_eq!(unbreakable.validate(), Ok(()));
    }
}
