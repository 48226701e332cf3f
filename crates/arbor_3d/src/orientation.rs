//! Orientation policy for photo cards
//!
//! A card billboards toward the camera while it is still mostly scattered and
//! turns to face away from the trunk once it is nearly formed. The switch is a
//! plain threshold on the card's approach value, re-evaluated every frame with
//! no hysteresis. All inputs are in formation-local space.
//!
//! Cards use the look-at convention where local +Z faces the target.

use arbor_core::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// How a photo card is turned this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Faces the camera
    Billboard,
    /// Faces away from the vertical axis, like an ornament hanging on a branch
    Outward,
}

impl OrientationMode {
    /// Mode for an approach value; strictly above `threshold` faces outward
    pub fn for_approach(approach: f32, threshold: f32) -> Self {
        if approach > threshold {
            OrientationMode::Outward
        } else {
            OrientationMode::Billboard
        }
    }
}

/// Rotation of a card at `position` for the given mode
pub fn orient(mode: OrientationMode, position: Vec3, camera: Vec3) -> Quat {
    match mode {
        OrientationMode::Billboard => Quat::facing(position, camera),
        OrientationMode::Outward => {
            let axis_point = Vec3::new(0.0, position.y, 0.0);
            Quat::facing(position, axis_point) * Quat::from_rotation_y(PI)
        }
    }
}
