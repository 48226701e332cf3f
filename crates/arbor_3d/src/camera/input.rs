//! Pointer input

use serde::{Deserialize, Serialize};

/// Latest sample from the pointing signal source
///
/// Coordinates are roughly in `[-1, 1]`. When tracking is lost the source keeps
/// reporting its last position with `detected` cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub detected: bool,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, detected: bool) -> Self {
        Self { x, y, detected }
    }

    /// Same position, tracking lost
    pub fn lost(self) -> Self {
        Self {
            detected: false,
            ..self
        }
    }

    /// Non-finite coordinates replaced by zero
    pub fn sanitized(self) -> Self {
        let clean = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            x: clean(self.x),
            y: clean(self.y),
            detected: self.detected,
        }
    }
}
