//! Ornaments
//!
//! Three kinds of ornament share one pose-update contract but differ in how
//! they move:
//!
//! - [`Category::Bauble`]: instanced spheres, snap to the raw control value
//! - [`Category::GiftBox`]: individual boxes with a fixed tilt, also snap
//! - [`Category::Photo`]: participant cards that glide on their own approach
//!   value, billboard or face outward, and can be staged by the lucky draw
//!
//! The per-kind state lives in [`OrnamentKind`] and the transition driver
//! dispatches on it with a single `match`.

mod card;

pub use card::CardLayout;

use arbor_core::{Color, Pose, Quat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ornament category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bauble,
    GiftBox,
    Photo,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Bauble, Category::GiftBox, Category::Photo];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Bauble => "bauble",
            Category::GiftBox => "gift_box",
            Category::Photo => "photo",
        };
        f.write_str(name)
    }
}

/// Smoothing state owned by each photo card
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoMotion {
    /// Lagging copy of the control value
    pub approach: f32,
    /// Pose written last frame, the starting point of the stage override
    pub pose: Pose,
    /// Card flip about the local Y axis, radians
    pub flip: f32,
}

impl PhotoMotion {
    fn new(target: Pose) -> Self {
        Self {
            approach: 1.0,
            pose: target,
            flip: 0.0,
        }
    }
}

/// Per-kind data
#[derive(Clone, Debug, PartialEq)]
pub enum OrnamentKind {
    Bauble { color: Color },
    GiftBox { color: Color, tilt: Quat },
    Photo(PhotoMotion),
}

/// One decorative entity
#[derive(Clone, Debug, PartialEq)]
pub struct Ornament {
    pub(crate) index: usize,
    pub(crate) target: Pose,
    pub(crate) chaos: Pose,
    pub(crate) kind: OrnamentKind,
}

impl Ornament {
    pub fn bauble(index: usize, target: Pose, chaos: Pose, color: Color) -> Self {
        Self {
            index,
            target,
            chaos,
            kind: OrnamentKind::Bauble { color },
        }
    }

    /// Gift boxes keep their chaos tilt in both layouts
    pub fn gift_box(index: usize, target: Pose, chaos: Pose, color: Color) -> Self {
        Self {
            index,
            target,
            chaos,
            kind: OrnamentKind::GiftBox {
                color,
                tilt: chaos.rotation,
            },
        }
    }

    /// Photo cards start fully formed
    pub fn photo(index: usize, target: Pose, chaos: Pose) -> Self {
        Self {
            index,
            target,
            chaos,
            kind: OrnamentKind::Photo(PhotoMotion::new(target)),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn category(&self) -> Category {
        match self.kind {
            OrnamentKind::Bauble { .. } => Category::Bauble,
            OrnamentKind::GiftBox { .. } => Category::GiftBox,
            OrnamentKind::Photo(_) => Category::Photo,
        }
    }

    pub fn target(&self) -> &Pose {
        &self.target
    }

    pub fn chaos(&self) -> &Pose {
        &self.chaos
    }

    pub fn kind(&self) -> &OrnamentKind {
        &self.kind
    }

    /// Photo smoothing state, `None` for simple categories
    pub fn motion(&self) -> Option<&PhotoMotion> {
        match &self.kind {
            OrnamentKind::Photo(motion) => Some(motion),
            _ => None,
        }
    }
}
