//! # Arbor 3D
//!
//! Choreography engine for a formation display: a tree of baubles, gift boxes
//! and participant photo cards that scatters and re-forms under one shared
//! control value, a pointer-driven camera rig, and a lucky draw that stages
//! one photo card for a prize reveal.
//!
//! This crate computes *what* pose every entity and the camera are in each
//! frame; drawing them is left to the host's rendering backend.
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor_3d::prelude::*;
//!
//! let mut director = Director::with_seed(ArborConfig::default(), 42).unwrap();
//! director.set_participants(vec![ImageHandle::with_size(1, 640, 480)]);
//! director.apply_gesture(HandGesture::closed(0.2, 0.0));
//!
//! let frame = director.frame(1.0 / 60.0);
//! for instance in &frame.instances {
//!     let _model = instance.pose.to_mat4();
//! }
//! ```

// Engine configuration
pub mod config;

// Error types
pub mod error;

// Ornament categories and per-kind state
pub mod ornament;

// Procedural target and chaos poses
pub mod layout;

// Control value blending
pub mod transition;

// Photo card facing
pub mod orientation;

// Camera rig and formation yaw
pub mod camera;

// Lucky draw session
pub mod draw;

// Requested formation amount
pub mod control;

// Per-frame pose pass
pub mod formation;

// Frame snapshot and render output
pub mod frame;

// Trigger and frame loop surface
pub mod director;

// Prelude for common imports
pub mod prelude;

pub use camera::{CameraFrame, CameraRig, PointerSample, RotationMode};
pub use config::ArborConfig;
pub use control::{FormationControl, HandGesture};
pub use director::Director;
pub use draw::{DrawOverlay, DrawPhase};
pub use error::{ArborError, ConfigError, DrawError, Result};
pub use frame::{FrameOutput, RenderInstance, VisualPayload};
pub use layout::{Layout, LayoutGenerator};
pub use ornament::{Category, Ornament};
