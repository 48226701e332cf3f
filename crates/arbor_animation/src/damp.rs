//! Exponential approach easing
//!
//! Every smoothed quantity in Arbor moves with the same form,
//! `current = lerp(current, target, rate * dt)`. The blend factor is clamped to
//! `[0, 1]` so a large rate or delta lands exactly on the target instead of
//! overshooting it.

use crate::values::Interpolate;

/// Blend factor for one step at `rate` per second over `dt` seconds
pub fn approach_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

/// One easing step from `current` toward `target`
pub fn approach<T: Interpolate>(current: &T, target: &T, rate: f32, dt: f32) -> T {
    current.lerp(target, approach_factor(rate, dt))
}

/// A value that eases toward a target at a fixed rate
#[derive(Clone, Debug)]
pub struct Smoothed<T: Interpolate> {
    current: T,
    target: T,
    /// Approach rate per second
    rate: f32,
}

impl<T: Interpolate> Smoothed<T> {
    /// Start at rest on `value`
    pub fn new(value: T, rate: f32) -> Self {
        Self {
            current: value.clone(),
            target: value,
            rate,
        }
    }

    /// Set target value
    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Set value immediately (no easing)
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value;
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn is_at_rest(&self, epsilon: f32) -> bool {
        self.current.approx_eq(&self.target, epsilon)
    }

    /// Advance by `dt` seconds and return the new value
    pub fn update(&mut self, dt: f32) -> &T {
        self.current = approach(&self.current, &self.target, self.rate, dt);
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::Vec2;

    #[test]
    fn test_factor_is_clamped() {
        assert_eq!(approach_factor(2.5, 0.1), 0.25);
        assert_eq!(approach_factor(50.0, 0.1), 1.0);
        assert_eq!(approach_factor(2.5, -1.0), 0.0);
    }

    #[test]
    fn test_approach_never_overshoots() {
        let mut value = 0.0f32;
        for _ in 0..200 {
            let next = approach(&value, &1.0, 7.5, 0.1);
            assert!(next >= value);
            assert!(next <= 1.0);
            value = next;
        }
        assert!((value - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_smoothed_vec2_converges() {
        let mut s = Smoothed::new(Vec2::ZERO, 4.0);
        s.set_target(Vec2::new(1.2, -0.5));
        for _ in 0..300 {
            s.update(1.0 / 60.0);
        }
        assert!(s.is_at_rest(1e-3));
    }

    #[test]
    fn test_zero_dt_holds_value() {
        let mut s = Smoothed::new(0.0f32, 4.0);
        s.set_target(10.0);
        assert_eq!(*s.update(0.0), 0.0);
    }
}
