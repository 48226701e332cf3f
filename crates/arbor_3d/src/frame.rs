//! Per-frame snapshot and render output

use crate::camera::{CameraFrame, PointerSample};
use crate::draw::DrawPhase;
use crate::ornament::{CardLayout, Category};
use arbor_core::{Color, ImageHandle, Pose, TextureHandle};
use serde::{Deserialize, Serialize};

/// Inputs sampled once at the start of a frame
///
/// Every component reads from this instead of from shared state, so nothing
/// a trigger does mid-frame is visible until the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Clamped delta, seconds
    pub dt: f32,
    pub elapsed: f64,
    pub frame: u64,
    /// Requested formation amount
    pub control: f32,
    pub pointer: PointerSample,
    pub phase: DrawPhase,
    /// Photo held on stage, only during `Winner` / `Revealed`
    pub staged_winner: Option<usize>,
}

/// Host assets attached to photo cards this frame
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameAssets<'a> {
    /// Participant photos, index-aligned with the photo cards
    pub participants: &'a [ImageHandle],
    /// Caption strip shown on non-winner cards
    pub caption: Option<TextureHandle>,
    /// Prize drawn for the current winner
    pub prize: Option<ImageHandle>,
}

/// What to draw for a photo card
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoPayload {
    pub image: ImageHandle,
    pub card: CardLayout,
    /// Flip about the card's local Y axis, radians
    pub flip: f32,
    /// Hidden on the staged winner
    pub caption: Option<TextureHandle>,
    pub winner: bool,
    /// Prize artwork on the winner's back face; `None` shows the plain back
    pub prize: Option<ImageHandle>,
}

/// Visual payload of one instance
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualPayload {
    Color(Color),
    Photo(PhotoPayload),
}

/// One ornament as the renderer should draw it, in formation-local space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderInstance {
    pub category: Category,
    pub index: usize,
    pub pose: Pose,
    pub payload: VisualPayload,
}

/// Everything the rendering backend needs for one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub frame: u64,
    pub elapsed: f64,
    /// Requested formation amount this frame
    pub control: f32,
    pub phase: DrawPhase,
    pub winner: Option<usize>,
    pub prize: Option<ImageHandle>,
    /// Camera plus formation yaw; instances are local to the yawed formation
    pub camera: CameraFrame,
    pub instances: Vec<RenderInstance>,
}

impl FrameOutput {
    pub fn instances_of(&self, category: Category) -> impl Iterator<Item = &RenderInstance> {
        self.instances
            .iter()
            .filter(move |instance| instance.category == category)
    }

    pub fn photo(&self, index: usize) -> Option<&RenderInstance> {
        self.instances_of(Category::Photo)
            .find(|instance| instance.index == index)
    }
}
