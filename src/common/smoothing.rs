//! Frame-rate independent exponential blending.

/// Fraction of the remaining gap to close this frame for a blend `weight` (1/s).
///
/// `weight <= 0` or `dt <= 0` yields `0.0`; large products approach `1.0` without overshoot.
#[inline]
pub fn blend_factor(weight: f32, dt: f32) -> f32 {
    if weight <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-weight * dt).exp()
}

/// Move `current` toward `target` by `blend_factor(weight, dt)`.
#[inline]
pub fn approach(current: f32, target: f32, weight: f32, dt: f32) -> f32 {
    current + (target - current) * blend_factor(weight, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_factor_is_bounded() {
        assert_eq!(blend_factor(0.0, 1.0), 0.0);
        assert_eq!(blend_factor(2.0, 0.0), 0.0);
        let a = blend_factor(2.0, 0.1);
        assert!(a > 0.0 && a < 1.0);
        assert!(blend_factor(1000.0, 10.0) <= 1.0);
    }

    #[test]
    fn approach_converges_without_overshoot() {
        let mut v = 0.0;
        for _ in 0..500 {
            v = approach(v, 1.0, 2.0, 0.05);
            assert!(v <= 1.0);
        }
        assert!((v - 1.0).abs() < 1e-4);
    }
}
