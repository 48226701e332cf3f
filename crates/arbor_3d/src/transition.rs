//! Transition driver
//!
//! Turns the shared control value into a pose for every ornament, once per
//! frame. Baubles and gift boxes blend chaos to target with the raw control
//! value, so they snap to whatever is requested. Photo cards keep their own
//! approach value that follows the control value at a fixed rate and blend
//! with that instead. A staged winner card skips the blend and is handed to
//! the [`StageParams`] override.

use crate::config::ArborConfig;
use crate::draw::StageParams;
use crate::orientation::{orient, OrientationMode};
use crate::ornament::{Ornament, OrnamentKind};
use arbor_animation::approach;
use arbor_core::{Pose, Quat, Vec3};

/// Per-frame inputs to the pose pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseInput {
    /// Clamped frame delta, seconds
    pub dt: f32,
    /// Requested formation amount
    pub control: f32,
    /// Camera position in formation-local space
    pub camera: Vec3,
    /// Photo index currently held on stage
    pub staged: Option<usize>,
    /// Flip angle the staged card eases toward
    pub flip_target: f32,
}

/// Computes ornament poses from the control value
#[derive(Clone, Debug)]
pub struct TransitionDriver {
    approach_rate: f32,
    billboard_threshold: f32,
    stage: StageParams,
}

impl TransitionDriver {
    pub fn new(config: &ArborConfig) -> Self {
        Self {
            approach_rate: config.motion.approach_rate,
            billboard_threshold: config.motion.billboard_threshold,
            stage: StageParams::new(&config.draw),
        }
    }

    /// Advance one ornament and return its pose for this frame
    pub fn update(&self, ornament: &mut Ornament, input: &PoseInput) -> Pose {
        let m = if input.control.is_finite() {
            input.control.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let chaos = ornament.chaos;
        let target = ornament.target;

        match &mut ornament.kind {
            OrnamentKind::Bauble { .. } => Pose {
                position: chaos.position.lerp(target.position, m),
                rotation: Quat::IDENTITY,
                scale: target.scale,
            },
            OrnamentKind::GiftBox { tilt, .. } => Pose {
                position: chaos.position.lerp(target.position, m),
                rotation: *tilt,
                scale: target.scale,
            },
            OrnamentKind::Photo(motion) => {
                motion.approach = approach(&motion.approach, &m, self.approach_rate, input.dt);

                if input.staged == Some(ornament.index) {
                    self.stage.step(motion, input.flip_target, input.dt);
                } else {
                    let a = motion.approach;
                    let position = chaos.position.lerp(target.position, a);
                    let mode = OrientationMode::for_approach(a, self.billboard_threshold);
                    motion.pose = Pose {
                        position,
                        rotation: orient(mode, position, input.camera),
                        scale: chaos.scale.lerp(target.scale, a),
                    };
                    motion.flip = approach(&motion.flip, &0.0, self.approach_rate, input.dt);
                }

                motion.pose
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::Color;

    fn driver() -> TransitionDriver {
        TransitionDriver::new(&ArborConfig::default())
    }

    fn input(control: f32, dt: f32) -> PoseInput {
        PoseInput {
            dt,
            control,
            camera: Vec3::new(0.0, 0.0, 32.0),
            staged: None,
            flip_target: 0.0,
        }
    }

    fn poses() -> (Pose, Pose) {
        let target = Pose::at(Vec3::new(2.0, 5.0, 1.0)).with_scale(Vec3::splat(1.0));
        let chaos = Pose::at(Vec3::new(-8.0, 0.5, 6.0))
            .with_rotation(Quat::from_euler(0.7, 0.2, 0.0))
            .with_scale(Vec3::splat(3.5));
        (target, chaos)
    }

    #[test]
    fn test_simple_categories_snap() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut bauble = Ornament::bauble(0, target, chaos, Color::WHITE);
        let mut gift = Ornament::gift_box(0, target, chaos, Color::WHITE);

        for m in [0.0, 1.0, 0.3, 0.0, 0.75, 1.0] {
            let expected = chaos.position.lerp(target.position, m);
            assert_eq!(driver.update(&mut bauble, &input(m, 0.016)).position, expected);
            let pose = driver.update(&mut gift, &input(m, 0.016));
            assert_eq!(pose.position, expected);
            assert_eq!(pose.rotation, chaos.rotation);
        }
    }

    #[test]
    fn test_simple_endpoints_exact() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut bauble = Ornament::bauble(0, target, chaos, Color::WHITE);
        assert_eq!(driver.update(&mut bauble, &input(1.0, 0.1)).position, target.position);
        assert_eq!(driver.update(&mut bauble, &input(0.0, 0.1)).position, chaos.position);
    }

    #[test]
    fn test_photo_glides_without_overshoot() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut photo = Ornament::photo(0, target, chaos);

        let mut previous = 1.0;
        for _ in 0..240 {
            driver.update(&mut photo, &input(0.0, 1.0 / 60.0));
            let a = photo.motion().unwrap().approach;
            assert!(a <= previous);
            assert!(a >= 0.0);
            previous = a;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn test_photo_lags_control() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut photo = Ornament::photo(0, target, chaos);
        let pose = driver.update(&mut photo, &input(0.0, 0.1));
        // one step at 2.5/s over 0.1s covers a quarter of the way
        assert!((photo.motion().unwrap().approach - 0.75).abs() < 1e-6);
        assert!(pose.position.distance(chaos.position.lerp(target.position, 0.75)) < 1e-5);
    }

    #[test]
    fn test_photo_faces_outward_when_formed() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut photo = Ornament::photo(0, target, chaos);
        let pose = driver.update(&mut photo, &input(1.0, 0.016));
        let expected = orient(OrientationMode::Outward, pose.position, Vec3::ZERO);
        assert_eq!(pose.rotation, expected);
    }

    #[test]
    fn test_photo_billboards_when_scattered() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut photo = Ornament::photo(0, target, chaos);
        let camera = Vec3::new(0.0, 0.0, 32.0);
        let mut pose = Pose::default();
        for _ in 0..60 {
            pose = driver.update(&mut photo, &input(0.0, 0.1));
        }
        assert_eq!(pose.rotation, orient(OrientationMode::Billboard, pose.position, camera));
    }

    #[test]
    fn test_staged_photo_ignores_blend() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut photo = Ornament::photo(2, target, chaos);
        let staged = PoseInput {
            staged: Some(2),
            flip_target: std::f32::consts::PI,
            ..input(0.0, 1.0 / 60.0)
        };
        let mut pose = Pose::default();
        for _ in 0..600 {
            pose = driver.update(&mut photo, &staged);
        }
        assert!(pose.position.distance(Vec3::new(0.0, 0.0, 22.0)) < 1e-3);
        assert!(pose.scale.distance(Vec3::splat(9.0)) < 1e-3);
        assert!((photo.motion().unwrap().flip - std::f32::consts::PI).abs() < 1e-3);
        // approach keeps following the control value underneath
        assert!(photo.motion().unwrap().approach < 1e-3);
    }

    #[test]
    fn test_unstaged_flip_eases_to_zero() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut photo = Ornament::photo(2, target, chaos);
        if let OrnamentKind::Photo(motion) = &mut photo.kind {
            motion.flip = std::f32::consts::PI;
        }

        // 2.5/s over 0.1s closes a quarter of the angle
        driver.update(&mut photo, &input(1.0, 0.1));
        let flip = photo.motion().unwrap().flip;
        assert!((flip - std::f32::consts::PI * 0.75).abs() < 1e-5);

        let mut previous = flip;
        for _ in 0..50 {
            driver.update(&mut photo, &input(1.0, 0.1));
            let flip = photo.motion().unwrap().flip;
            assert!(flip <= previous && flip >= 0.0);
            previous = flip;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn test_other_photos_not_staged() {
        let driver = driver();
        let (target, chaos) = poses();
        let mut photo = Ornament::photo(1, target, chaos);
        let staged = PoseInput {
            staged: Some(2),
            ..input(1.0, 0.1)
        };
        let pose = driver.update(&mut photo, &staged);
        assert_eq!(pose.position, target.position);
    }
}
