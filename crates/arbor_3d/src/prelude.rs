//! Prelude module for convenient imports
//!
//! ```ignore
//! use arbor_3d::prelude::*;
//! ```

pub use crate::camera::{CameraFrame, CameraRig, PointerSample, RotationMode};
pub use crate::config::ArborConfig;
pub use crate::control::{FormationControl, HandGesture, FORMED, SCATTERED};
pub use crate::director::Director;
pub use crate::draw::{DrawOverlay, DrawPhase};
pub use crate::error::{ArborError, ConfigError, DrawError};
pub use crate::frame::{FrameOutput, PhotoPayload, RenderInstance, VisualPayload};
pub use crate::layout::{Layout, LayoutGenerator};
pub use crate::ornament::{CardLayout, Category, Ornament};

pub use arbor_core::{Color, ImageHandle, Pose, Quat, TextureHandle, Vec2, Vec3};
