//! Camera rig
//!
//! The camera itself only drifts with the smoothed pointer and zooms; the
//! visible spin comes from yawing the whole formation. [`CameraRig`] owns both
//! and reports them together as a [`CameraFrame`].

mod input;
mod rig;

pub use input::PointerSample;
pub use rig::{wrap_angle, CameraRig};

use crate::draw::DrawPhase;
use arbor_core::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// How the formation yaw moves this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Slow continuous idle spin
    #[default]
    Auto,
    /// Yaw follows the pointer
    Gesture,
    /// Fast open-ended spin while a winner is picked
    Spin,
    /// Ease to the nearest whole turn while a winner is staged
    Settle,
}

impl RotationMode {
    /// Mode for this frame, in priority order: draw phase first, then pointer
    pub fn resolve(phase: DrawPhase, pointer_detected: bool) -> Self {
        match phase {
            DrawPhase::Picking => RotationMode::Spin,
            DrawPhase::Winner | DrawPhase::Revealed => RotationMode::Settle,
            DrawPhase::Idle if pointer_detected => RotationMode::Gesture,
            DrawPhase::Idle => RotationMode::Auto,
        }
    }
}

/// Camera and formation transform produced by the rig
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    /// World position
    pub position: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
    /// Camera rotation, local -Z toward `look_at`
    pub rotation: Quat,
    /// Formation yaw about the vertical axis, radians in `[-π, π)`
    pub yaw: f32,
    pub mode: RotationMode,
}

impl CameraFrame {
    /// Camera position expressed in the yawed formation's local frame
    pub fn local_position(&self) -> Vec3 {
        Quat::from_rotation_y(-self.yaw).rotate_vec3(self.position)
    }
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            yaw: 0.0,
            mode: RotationMode::Auto,
        }
    }
}

/// Context passed to the rig during update
#[derive(Clone, Copy, Debug)]
pub struct CameraUpdateContext {
    /// Clamped delta time in seconds
    pub dt: f32,
    /// Draw phase this frame
    pub phase: DrawPhase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_mode_priority() {
        assert_eq!(RotationMode::resolve(DrawPhase::Picking, true), RotationMode::Spin);
        assert_eq!(RotationMode::resolve(DrawPhase::Winner, true), RotationMode::Settle);
        assert_eq!(RotationMode::resolve(DrawPhase::Revealed, false), RotationMode::Settle);
        assert_eq!(RotationMode::resolve(DrawPhase::Idle, true), RotationMode::Gesture);
        assert_eq!(RotationMode::resolve(DrawPhase::Idle, false), RotationMode::Auto);
    }

    #[test]
    fn test_local_position_undoes_yaw() {
        let frame = CameraFrame {
            position: Vec3::new(0.0, 0.0, 10.0),
            yaw: FRAC_PI_2,
            ..CameraFrame::default()
        };
        // formation turned a quarter left: the camera sits on its local -X side
        let local = frame.local_position();
        assert!(local.distance(Vec3::new(-10.0, 0.0, 0.0)) < 1e-4, "{:?}", local);
    }
}
