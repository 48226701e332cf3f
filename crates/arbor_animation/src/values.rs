//! Animatable value types
//!
//! Linear interpolation for scalars and vectors, spherical interpolation for
//! rotations.

use arbor_core::{Quat, Vec2, Vec3};

/// Trait for values that can be interpolated
pub trait Interpolate: Clone {
    /// Interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Vector Implementations
// ============================================================================

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::lerp(self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Interpolate for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

// ============================================================================
// Quaternion Implementation
// ============================================================================

impl Interpolate for Quat {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        // For quaternions, use slerp for proper rotation interpolation
        self.slerp(*other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let dot = self.dot(*other).abs();
        dot > 1.0 - epsilon
    }
}
