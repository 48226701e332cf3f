//! Opaque handles to host-owned assets
//!
//! The host decodes images and rasterizes caption textures; Arbor only carries
//! their identities through to the render output.

use serde::{Deserialize, Serialize};

/// Reference to a decoded image (participant photo or prize artwork)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle {
    pub id: u64,
    /// Pixel width, 0 when unknown
    #[serde(default)]
    pub width: u32,
    /// Pixel height, 0 when unknown
    #[serde(default)]
    pub height: u32,
}

impl ImageHandle {
    /// Handle with unknown dimensions
    pub fn new(id: u64) -> Self {
        Self {
            id,
            width: 0,
            height: 0,
        }
    }

    pub fn with_size(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Width / height, or 1.0 when either dimension is unknown
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Reference to a precomputed texture (caption strip)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_falls_back_to_square() {
        assert_eq!(ImageHandle::new(7).aspect(), 1.0);
        assert_eq!(ImageHandle::with_size(7, 640, 0).aspect(), 1.0);
        assert_eq!(ImageHandle::with_size(7, 800, 400).aspect(), 2.0);
    }
}
