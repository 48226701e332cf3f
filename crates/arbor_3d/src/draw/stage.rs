//! Stage override for the winner card
//!
//! While a winner is staged its card stops following the formation: it eases
//! toward the stage point, grows to the configured magnification, rotates
//! back to identity and flips toward the phase's flip target.

use crate::config::DrawConfig;
use crate::ornament::PhotoMotion;
use arbor_animation::approach;
use arbor_core::{Quat, Vec3};

/// Easing targets and rates for a staged card
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageParams {
    pub point: Vec3,
    pub magnification: f32,
    pub reveal_rate: f32,
    pub flip_rate: f32,
}

impl StageParams {
    pub fn new(config: &DrawConfig) -> Self {
        Self {
            point: config.stage_point,
            magnification: config.magnification,
            reveal_rate: config.reveal_rate,
            flip_rate: config.flip_rate,
        }
    }

    /// Move a staged card one frame closer to the stage
    pub fn step(&self, motion: &mut PhotoMotion, flip_target: f32, dt: f32) {
        let pose = &mut motion.pose;
        pose.position = approach(&pose.position, &self.point, self.reveal_rate, dt);
        pose.scale = approach(
            &pose.scale,
            &Vec3::splat(self.magnification),
            self.reveal_rate,
            dt,
        );
        pose.rotation = approach(&pose.rotation, &Quat::IDENTITY, self.reveal_rate, dt);
        motion.flip = approach(&motion.flip, &flip_target, self.flip_rate, dt);
    }
}

impl Default for StageParams {
    fn default() -> Self {
        Self::new(&DrawConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::Pose;
    use std::f32::consts::PI;

    fn motion() -> PhotoMotion {
        PhotoMotion {
            approach: 1.0,
            pose: Pose::at(Vec3::new(5.0, 3.0, -2.0))
                .with_rotation(Quat::from_euler(0.3, 1.0, 0.0)),
            flip: 0.0,
        }
    }

    #[test]
    fn test_converges_on_stage() {
        let stage = StageParams::default();
        let mut m = motion();
        for _ in 0..300 {
            stage.step(&mut m, PI, 1.0 / 60.0);
        }
        assert!(m.pose.position.distance(Vec3::new(0.0, 0.0, 22.0)) < 1e-3);
        assert!(m.pose.scale.distance(Vec3::splat(9.0)) < 1e-3);
        assert!(m.pose.rotation.angle_to(Quat::IDENTITY) < 1e-2);
        assert!((m.flip - PI).abs() < 1e-3);
    }

    #[test]
    fn test_flip_is_faster_than_move() {
        let stage = StageParams::default();
        let mut m = motion();
        stage.step(&mut m, PI, 0.05);
        let flip_progress = m.flip / PI;
        let start = motion().pose.position;
        let move_progress = 1.0
            - m.pose.position.distance(stage.point) / start.distance(stage.point);
        assert!(flip_progress > move_progress);
    }
}
