//! Arbor Animation System
//!
//! Small, allocation-free building blocks for per-frame motion.
//!
//! # Features
//!
//! - **Interpolation**: `Interpolate` for scalars, vectors and rotations
//! - **Exponential approach**: `lerp(current, target, rate * dt)` easing that never overshoots
//! - **Frame clock**: clamps stalled-frame deltas before they reach any rate computation
//! - **Timers**: generation-checked, cancellable delayed events driven by frame time

pub mod clock;
pub mod damp;
pub mod scheduler;
pub mod values;

pub use clock::{FrameClock, FrameTime};
pub use damp::{approach, approach_factor, Smoothed};
pub use scheduler::{TimerId, TimerScheduler};
pub use values::Interpolate;
