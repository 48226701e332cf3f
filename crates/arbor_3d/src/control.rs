//! Formation control value
//!
//! The single requested formation amount every ornament reads each frame.
//! `0` is fully scattered, `1` fully formed. It is written by discrete
//! triggers only: the manual toggle, hand-gesture classification and the draw
//! session.

use crate::camera::PointerSample;
use serde::{Deserialize, Serialize};

/// Fully scattered
pub const SCATTERED: f32 = 0.0;
/// Fully formed tree
pub const FORMED: f32 = 1.0;

/// Classified hand pose from the gesture source
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandGesture {
    /// Hand position, roughly in `[-1, 1]`
    pub x: f32,
    pub y: f32,
    /// Open palm scatters, closed fist forms
    pub open: bool,
    /// Whether a hand is in view at all
    pub detected: bool,
}

impl HandGesture {
    pub fn open(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            open: true,
            detected: true,
        }
    }

    pub fn closed(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            open: false,
            detected: true,
        }
    }

    pub fn lost() -> Self {
        Self::default()
    }

    /// Pointer sample this gesture implies, given the previous one
    ///
    /// A lost hand keeps the last known position.
    pub fn pointer(&self, previous: PointerSample) -> PointerSample {
        if self.detected {
            PointerSample::new(self.x, self.y, true)
        } else {
            previous.lost()
        }
    }

    /// Formation amount the hand asks for, `None` without a hand
    pub fn requested(&self) -> Option<f32> {
        if !self.detected {
            None
        } else if self.open {
            Some(SCATTERED)
        } else {
            Some(FORMED)
        }
    }
}

/// Owner of the requested formation amount
#[derive(Clone, Debug, PartialEq)]
pub struct FormationControl {
    value: f32,
    gestures_enabled: bool,
}

impl FormationControl {
    /// Starts formed, with gestures enabled
    pub fn new() -> Self {
        Self {
            value: FORMED,
            gestures_enabled: true,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        if self.gestures_enabled != enabled {
            tracing::debug!("Gesture control {}", if enabled { "enabled" } else { "disabled" });
        }
        self.gestures_enabled = enabled;
    }

    /// Request a formation amount, clamped to `[0, 1]`
    pub fn request(&mut self, value: f32) {
        if value.is_finite() {
            self.value = value.clamp(SCATTERED, FORMED);
        }
    }

    /// Manual toggle between formed and scattered
    pub fn toggle(&mut self) -> f32 {
        self.value = if self.value == FORMED { SCATTERED } else { FORMED };
        self.value
    }

    /// Apply a classified gesture; returns whether the value changed
    pub fn apply_gesture(&mut self, gesture: &HandGesture) -> bool {
        if !self.gestures_enabled {
            return false;
        }
        match gesture.requested() {
            Some(value) if value != self.value => {
                self.value = value;
                true
            }
            _ => false,
        }
    }
}

impl Default for FormationControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_formed() {
        assert_eq!(FormationControl::new().value(), FORMED);
    }

    #[test]
    fn test_toggle() {
        let mut control = FormationControl::new();
        assert_eq!(control.toggle(), SCATTERED);
        assert_eq!(control.toggle(), FORMED);

        control.request(0.4);
        assert_eq!(control.toggle(), FORMED);
    }

    #[test]
    fn test_request_clamps() {
        let mut control = FormationControl::new();
        control.request(-2.0);
        assert_eq!(control.value(), 0.0);
        control.request(7.0);
        assert_eq!(control.value(), 1.0);
        control.request(f32::NAN);
        assert_eq!(control.value(), 1.0);
    }

    #[test]
    fn test_gestures() {
        let mut control = FormationControl::new();
        assert!(control.apply_gesture(&HandGesture::open(0.1, 0.0)));
        assert_eq!(control.value(), SCATTERED);
        assert!(!control.apply_gesture(&HandGesture::open(0.3, 0.0)));
        assert!(!control.apply_gesture(&HandGesture::lost()));
        assert!(control.apply_gesture(&HandGesture::closed(0.0, 0.0)));
        assert_eq!(control.value(), FORMED);
    }

    #[test]
    fn test_disabled_gestures_ignored() {
        let mut control = FormationControl::new();
        control.set_gestures_enabled(false);
        assert!(!control.apply_gesture(&HandGesture::open(0.0, 0.0)));
        assert_eq!(control.value(), FORMED);
    }

    #[test]
    fn test_lost_hand_keeps_position() {
        let previous = PointerSample::new(0.4, -0.2, true);
        let sample = HandGesture::lost().pointer(previous);
        assert_eq!(sample, PointerSample::new(0.4, -0.2, false));
        assert_eq!(
            HandGesture::closed(0.9, 0.1).pointer(previous),
            PointerSample::new(0.9, 0.1, true)
        );
    }
}
