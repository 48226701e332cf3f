//! Camera rig controller

use super::{CameraFrame, CameraUpdateContext, PointerSample, RotationMode};
use crate::config::CameraConfig;
use arbor_animation::{approach, Smoothed};
use arbor_core::{Quat, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Wrap an angle into `[-π, π)`
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU itself
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Pointer-following camera with wheel zoom, driving the formation yaw
///
/// # Example
///
/// ```
/// use arbor_3d::camera::{CameraRig, CameraUpdateContext, PointerSample};
/// use arbor_3d::config::CameraConfig;
/// use arbor_3d::draw::DrawPhase;
///
/// let mut rig = CameraRig::new(&CameraConfig::default());
/// rig.apply_zoom(10_000.0);
/// assert_eq!(rig.zoom(), 55.0);
///
/// let ctx = CameraUpdateContext { dt: 0.016, phase: DrawPhase::Idle };
/// let frame = rig.update(&ctx, &PointerSample::default());
/// assert_eq!(frame.position.z, 55.0);
/// ```
#[derive(Clone, Debug)]
pub struct CameraRig {
    pointer_x_gain: f32,
    offset_gain: Vec2,
    zoom_initial: f32,
    zoom_min: f32,
    zoom_max: f32,
    wheel_factor: f32,
    idle_spin_rate: f32,
    draw_spin_rate: f32,
    settle_rate: f32,
    gesture_rate: f32,

    offset: Smoothed<Vec2>,
    zoom: f32,
    yaw: f32,
    mode: RotationMode,
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            pointer_x_gain: config.pointer_x_gain,
            offset_gain: Vec2::new(config.offset_gain_x, config.offset_gain_y),
            zoom_initial: config.zoom_initial,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            wheel_factor: config.wheel_factor,
            idle_spin_rate: config.idle_spin_rate,
            draw_spin_rate: config.draw_spin_rate,
            settle_rate: config.settle_rate,
            gesture_rate: config.gesture_rate,

            offset: Smoothed::new(Vec2::ZERO, config.pointer_rate),
            zoom: config.zoom_initial.clamp(config.zoom_min, config.zoom_max),
            yaw: 0.0,
            mode: RotationMode::Auto,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Smoothed pointer offset, before the position gains
    pub fn offset(&self) -> Vec2 {
        *self.offset.get()
    }

    /// Accumulate a wheel delta, clamped to the zoom range
    pub fn apply_zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.set_zoom(self.zoom + delta * self.wheel_factor);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
        }
    }

    /// Back to the initial offset, zoom and yaw
    pub fn reset(&mut self) {
        self.offset.set_immediate(Vec2::ZERO);
        self.zoom = self.zoom_initial.clamp(self.zoom_min, self.zoom_max);
        self.yaw = 0.0;
        self.mode = RotationMode::Auto;
    }

    /// Advance one frame
    pub fn update(&mut self, ctx: &CameraUpdateContext, input: &PointerSample) -> CameraFrame {
        let input = input.sanitized();
        let dt = ctx.dt;

        self.offset
            .set_target(Vec2::new(input.x * self.pointer_x_gain, input.y));
        let offset = *self.offset.update(dt);

        self.mode = RotationMode::resolve(ctx.phase, input.detected);
        self.yaw = match self.mode {
            RotationMode::Spin => wrap_angle(self.yaw + self.draw_spin_rate * dt),
            RotationMode::Settle => {
                let neutral = (self.yaw / TAU).round() * TAU;
                approach(&self.yaw, &neutral, self.settle_rate, dt)
            }
            RotationMode::Gesture => {
                approach(&self.yaw, &(input.x * PI), self.gesture_rate, dt)
            }
            RotationMode::Auto => wrap_angle(self.yaw + self.idle_spin_rate * dt),
        };

        let position = Vec3::new(
            offset.x * self.offset_gain.x,
            offset.y * self.offset_gain.y,
            self.zoom,
        );
        let look_at = Vec3::ZERO;

        CameraFrame {
            position,
            look_at,
            rotation: Quat::look_at(position - look_at, Vec3::UP),
            yaw: self.yaw,
            mode: self.mode,
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawPhase;

    fn ctx(phase: DrawPhase, dt: f32) -> CameraUpdateContext {
        CameraUpdateContext { dt, phase }
    }

    #[test]
    fn test_zoom_stays_in_range() {
        let mut rig = CameraRig::default();
        assert_eq!(rig.zoom(), 32.0);

        for delta in [500.0, 1e9, -3.0, -1e9, 250.0, f32::NAN, -40.0] {
            rig.apply_zoom(delta);
            assert!((12.0..=55.0).contains(&rig.zoom()), "{}", rig.zoom());
        }

        rig.apply_zoom(-1e9);
        assert_eq!(rig.zoom(), 12.0);
        rig.apply_zoom(100.0);
        assert!((rig.zoom() - 14.0).abs() < 1e-5);
    }

    #[test]
    fn test_auto_yaw_increases() {
        let mut rig = CameraRig::default();
        let pointer = PointerSample::default();
        let mut previous = rig.yaw();
        for _ in 0..5000 {
            let frame = rig.update(&ctx(DrawPhase::Idle, 0.1), &pointer);
            assert_eq!(frame.mode, RotationMode::Auto);
            let step = (frame.yaw - previous).rem_euclid(TAU);
            assert!(step > 0.0 && step < 0.1, "step {}", step);
            assert!((-PI..PI).contains(&frame.yaw));
            previous = frame.yaw;
        }
    }

    #[test]
    fn test_spin_is_fast_and_wrapped() {
        let mut rig = CameraRig::default();
        let pointer = PointerSample::new(0.5, 0.0, true);
        let frame = rig.update(&ctx(DrawPhase::Picking, 0.1), &pointer);
        assert_eq!(frame.mode, RotationMode::Spin);
        assert!((frame.yaw - 0.75).abs() < 1e-5);

        for _ in 0..100 {
            let frame = rig.update(&ctx(DrawPhase::Picking, 0.1), &pointer);
            assert!((-PI..PI).contains(&frame.yaw));
        }
    }

    #[test]
    fn test_settle_reaches_whole_turn() {
        let mut rig = CameraRig::default();
        let pointer = PointerSample::default();
        for _ in 0..7 {
            rig.update(&ctx(DrawPhase::Picking, 0.1), &pointer);
        }
        assert!(rig.yaw().abs() > 0.1);

        for _ in 0..600 {
            rig.update(&ctx(DrawPhase::Winner, 1.0 / 60.0), &pointer);
        }
        let off = rig.yaw() - (rig.yaw() / TAU).round() * TAU;
        assert!(off.abs() < 1e-3, "yaw {}", rig.yaw());
        assert_eq!(rig.mode(), RotationMode::Settle);
    }

    #[test]
    fn test_gesture_follows_pointer_x() {
        let mut rig = CameraRig::default();
        let pointer = PointerSample::new(-0.5, 0.2, true);
        for _ in 0..600 {
            rig.update(&ctx(DrawPhase::Idle, 1.0 / 60.0), &pointer);
        }
        assert_eq!(rig.mode(), RotationMode::Gesture);
        assert!((rig.yaw() + PI * 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_offset_smoothing_and_gains() {
        let mut rig = CameraRig::default();
        let pointer = PointerSample::new(1.0, 0.5, false);

        let first = rig.update(&ctx(DrawPhase::Idle, 0.1), &pointer);
        // 4/s over 0.1s covers 40% of the way to (1.2, 0.5)
        assert!((first.position.x - 1.2 * 0.4 * 4.0).abs() < 1e-4);
        assert!((first.position.y - 0.5 * 0.4 * 2.0).abs() < 1e-4);
        assert_eq!(first.position.z, 32.0);

        for _ in 0..600 {
            rig.update(&ctx(DrawPhase::Idle, 1.0 / 60.0), &pointer);
        }
        assert!((rig.offset().x - 1.2).abs() < 1e-3);
        assert!((rig.offset().y - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_camera_looks_at_origin() {
        let mut rig = CameraRig::default();
        let frame = rig.update(&ctx(DrawPhase::Idle, 0.1), &PointerSample::new(0.7, -0.4, true));
        let forward = frame.rotation.rotate_vec3(Vec3::new(0.0, 0.0, -1.0));
        let expected = (frame.look_at - frame.position).normalize();
        assert!(forward.distance(expected) < 1e-4);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut rig = CameraRig::default();
        rig.apply_zoom(400.0);
        rig.update(&ctx(DrawPhase::Picking, 0.1), &PointerSample::new(1.0, 1.0, true));
        rig.reset();
        assert_eq!(rig.zoom(), 32.0);
        assert_eq!(rig.yaw(), 0.0);
        assert_eq!(rig.offset(), Vec2::ZERO);
    }
}
