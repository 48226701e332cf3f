//! Photo card geometry
//!
//! A card is a thin frame with the participant photo near the top, a caption
//! strip along the wider bottom margin and, on the back, the prize artwork.
//! All sizes are in card-local units before the ornament's scale is applied.

use arbor_core::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Length of the photo's long side
const PHOTO_LONG_SIDE: f32 = 0.85;
const SIDE_MARGIN: f32 = 0.08;
const TOP_MARGIN: f32 = 0.08;
const BOTTOM_MARGIN: f32 = 0.20;
const FRAME_DEPTH: f32 = 0.05;
/// Offset of face content from the frame surface
const FACE_INSET: f32 = 0.001;

/// Sizes and offsets of a photo card's parts
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    /// Frame width, height and depth
    pub frame: Vec3,
    pub photo_size: Vec2,
    pub photo_offset: Vec3,
    pub caption_size: Vec2,
    pub caption_offset: Vec3,
    /// Prize artwork on the back face, seen after a half turn
    pub prize_size: Vec2,
    pub prize_offset: Vec3,
}

impl CardLayout {
    /// Layout for a photo of the given width / height ratio
    ///
    /// Unknown or degenerate ratios fall back to a square photo.
    pub fn from_aspect(aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };

        let (photo_w, photo_h) = if aspect >= 1.0 {
            (PHOTO_LONG_SIDE, PHOTO_LONG_SIDE / aspect)
        } else {
            (PHOTO_LONG_SIDE * aspect, PHOTO_LONG_SIDE)
        };

        let frame_w = photo_w + SIDE_MARGIN * 2.0;
        let frame_h = photo_h + TOP_MARGIN + BOTTOM_MARGIN;
        let face_z = FRAME_DEPTH / 2.0 + FACE_INSET;

        Self {
            frame: Vec3::new(frame_w, frame_h, FRAME_DEPTH),
            photo_size: Vec2::new(photo_w, photo_h),
            photo_offset: Vec3::new(0.0, frame_h / 2.0 - TOP_MARGIN - photo_h / 2.0, face_z),
            caption_size: Vec2::new(frame_w, BOTTOM_MARGIN),
            caption_offset: Vec3::new(0.0, -frame_h / 2.0 + BOTTOM_MARGIN / 2.0, face_z),
            prize_size: Vec2::new(frame_w * 0.75, frame_h * 0.48),
            prize_offset: Vec3::new(0.0, -0.05, -face_z),
        }
    }
}

impl Default for CardLayout {
    fn default() -> Self {
        Self::from_aspect(1.0)
    }
}
