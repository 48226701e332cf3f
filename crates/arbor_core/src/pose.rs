//! Entity pose

use crate::geometry::{Mat4, Vec3};
use crate::quat::Quat;
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of one entity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Pose {
    /// Unrotated, unit-scale pose at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Model matrix, translation * rotation * scale
    pub fn to_mat4(&self) -> Mat4 {
        let t = Mat4::translation(self.position.x, self.position.y, self.position.z);
        let s = Mat4::scale(self.scale.x, self.scale.y, self.scale.z);
        t.mul(&self.rotation.to_mat4()).mul(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_to_mat4_applies_scale_rotation_translation() {
        let pose = Pose::at(Vec3::new(0.0, 1.0, 0.0))
            .with_rotation(Quat::from_rotation_y(PI / 2.0))
            .with_scale(Vec3::splat(2.0));
        let p = pose.to_mat4().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(0.0, 1.0, -2.0)).length() < 1e-4);
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_string(&Pose::default()).unwrap();
        assert!(json.contains("\"position\""));
        let back: Pose = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Pose::default());
    }
}
