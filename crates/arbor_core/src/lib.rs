//! Arbor Core
//!
//! Foundational value types shared by every Arbor crate:
//!
//! - **Geometry**: `Vec2`, `Vec3`, `Mat4` and an RGBA `Color`
//! - **Rotation**: `Quat`, including the look-at helpers used for billboarding
//! - **Pose**: position / rotation / scale triple produced for every entity each frame
//! - **Handles**: opaque references to images and textures owned by the host
//!
//! # Example
//!
//! ```rust
//! use arbor_core::{Pose, Vec3};
//!
//! let a = Pose::at(Vec3::new(0.0, 0.0, 0.0));
//! let b = Pose::at(Vec3::new(2.0, 0.0, 0.0));
//! assert_eq!(a.position.lerp(b.position, 0.5), Vec3::new(1.0, 0.0, 0.0));
//! ```

pub mod geometry;
pub mod handle;
pub mod pose;
pub mod quat;

pub use geometry::{Color, Mat4, Vec2, Vec3};
pub use handle::{ImageHandle, TextureHandle};
pub use pose::Pose;
pub use quat::Quat;
