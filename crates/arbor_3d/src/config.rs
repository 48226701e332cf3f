//! Arbor configuration
//!
//! Every tunable of the choreography engine lives here. The tree deserializes
//! from TOML with every field defaulted, so a file only has to name what it
//! overrides:
//!
//! ```toml
//! [camera]
//! zoom_initial = 40.0
//!
//! [draw]
//! pick_delay = 5.0
//! ```

use crate::error::ConfigError;
use arbor_core::{Color, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default bauble palette
pub const BAUBLE_PALETTE: [u32; 7] = [
    0x8B0000, 0xD32F2F, 0x1B5E20, 0xD4AF37, 0xC0C0C0, 0x191970, 0xE5E5E5,
];

/// Default gift box palette
pub const GIFT_BOX_PALETTE: [u32; 4] = [0xA00000, 0x1A4D2E, 0x0A1D37, 0xD4AF37];

// =============================================================================
// Root
// =============================================================================

/// Complete engine configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ArborConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub bauble: BaubleConfig,
    #[serde(default)]
    pub gift_box: GiftBoxConfig,
    #[serde(default)]
    pub photo: PhotoConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

impl ArborConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ArborConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        positive("layout.tree_height", layout.tree_height)?;
        positive("layout.base_radius", layout.base_radius)?;
        positive("layout.spread", layout.spread)?;
        finite("layout.apex", layout.apex)?;

        validate_category(
            "bauble",
            self.bauble.scale,
            self.bauble.chaos_radius,
            self.bauble.outward,
            &self.bauble.palette,
        )?;
        validate_category(
            "gift_box",
            self.gift_box.scale,
            self.gift_box.chaos_radius,
            self.gift_box.outward,
            &self.gift_box.palette,
        )?;

        let photo = &self.photo;
        if photo.max_participants == 0 {
            return Err(invalid("photo.max_participants must be at least 1"));
        }
        positive("photo.target_scale", photo.target_scale)?;
        positive("photo.chaos_scale", photo.chaos_scale)?;
        positive("photo.chaos_radius", photo.chaos_radius)?;
        positive("photo.outward", photo.outward)?;

        let motion = &self.motion;
        non_negative("motion.approach_rate", motion.approach_rate)?;
        positive("motion.max_dt", motion.max_dt)?;
        if !(0.0..=1.0).contains(&motion.billboard_threshold) {
            return Err(invalid(format!(
                "motion.billboard_threshold must be within [0, 1], got {}",
                motion.billboard_threshold
            )));
        }

        let camera = &self.camera;
        non_negative("camera.pointer_rate", camera.pointer_rate)?;
        finite("camera.pointer_x_gain", camera.pointer_x_gain)?;
        finite("camera.offset_gain_x", camera.offset_gain_x)?;
        finite("camera.offset_gain_y", camera.offset_gain_y)?;
        positive("camera.zoom_min", camera.zoom_min)?;
        positive("camera.zoom_max", camera.zoom_max)?;
        if camera.zoom_min > camera.zoom_max {
            return Err(invalid(format!(
                "camera.zoom_min ({}) is greater than camera.zoom_max ({})",
                camera.zoom_min, camera.zoom_max
            )));
        }
        finite("camera.zoom_initial", camera.zoom_initial)?;
        finite("camera.wheel_factor", camera.wheel_factor)?;
        finite("camera.idle_spin_rate", camera.idle_spin_rate)?;
        finite("camera.draw_spin_rate", camera.draw_spin_rate)?;
        non_negative("camera.settle_rate", camera.settle_rate)?;
        non_negative("camera.gesture_rate", camera.gesture_rate)?;

        let draw = &self.draw;
        non_negative("draw.pick_delay", draw.pick_delay)?;
        non_negative("draw.reform_delay", draw.reform_delay)?;
        positive("draw.magnification", draw.magnification)?;
        non_negative("draw.reveal_rate", draw.reveal_rate)?;
        non_negative("draw.flip_rate", draw.flip_rate)?;
        if !draw.stage_point.is_finite() {
            return Err(invalid("draw.stage_point must be finite"));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(invalid(format!("{name} must not be negative, got {value}")));
    }
    Ok(())
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(invalid(format!("{name} must be positive, got {value}")));
    }
    Ok(())
}

fn validate_category(
    section: &str,
    scale: f32,
    chaos_radius: f32,
    outward: f32,
    palette: &[u32],
) -> Result<(), ConfigError> {
    positive(&format!("{section}.scale"), scale)?;
    positive(&format!("{section}.chaos_radius"), chaos_radius)?;
    positive(&format!("{section}.outward"), outward)?;
    if palette.is_empty() {
        return Err(invalid(format!("{section}.palette must not be empty")));
    }
    Ok(())
}

// =============================================================================
// Layout
// =============================================================================

/// Shape of the tree surface the phyllotaxis spiral is laid on
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Vertical extent from apex to base
    #[serde(default = "default_tree_height")]
    pub tree_height: f32,
    /// Radius at the base
    #[serde(default = "default_base_radius")]
    pub base_radius: f32,
    /// Height of the apex
    #[serde(default = "default_apex")]
    pub apex: f32,
    /// Fraction of the cone the spiral covers
    #[serde(default = "default_spread")]
    pub spread: f32,
}

fn default_tree_height() -> f32 {
    18.0
}

fn default_base_radius() -> f32 {
    7.5
}

fn default_apex() -> f32 {
    9.0
}

fn default_spread() -> f32 {
    0.9
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tree_height: default_tree_height(),
            base_radius: default_base_radius(),
            apex: default_apex(),
            spread: default_spread(),
        }
    }
}

// =============================================================================
// Categories
// =============================================================================

fn default_scatter_radius() -> f32 {
    25.0
}

fn default_ornament_outward() -> f32 {
    1.05
}

/// Baubles: instanced spheres
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BaubleConfig {
    #[serde(default = "default_bauble_count")]
    pub count: usize,
    #[serde(default = "default_bauble_scale")]
    pub scale: f32,
    #[serde(default = "default_scatter_radius")]
    pub chaos_radius: f32,
    #[serde(default = "default_ornament_outward")]
    pub outward: f32,
    /// `0xRRGGBB` colors, cycled by index
    #[serde(default = "default_bauble_palette")]
    pub palette: Vec<u32>,
}

fn default_bauble_count() -> usize {
    70
}

fn default_bauble_scale() -> f32 {
    0.45
}

fn default_bauble_palette() -> Vec<u32> {
    BAUBLE_PALETTE.to_vec()
}

impl Default for BaubleConfig {
    fn default() -> Self {
        Self {
            count: default_bauble_count(),
            scale: default_bauble_scale(),
            chaos_radius: default_scatter_radius(),
            outward: default_ornament_outward(),
            palette: default_bauble_palette(),
        }
    }
}

/// Gift boxes: individually placed, with a fixed random tilt
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GiftBoxConfig {
    #[serde(default = "default_gift_box_count")]
    pub count: usize,
    #[serde(default = "default_gift_box_scale")]
    pub scale: f32,
    #[serde(default = "default_scatter_radius")]
    pub chaos_radius: f32,
    #[serde(default = "default_ornament_outward")]
    pub outward: f32,
    /// `0xRRGGBB` colors, cycled by index
    #[serde(default = "default_gift_box_palette")]
    pub palette: Vec<u32>,
}

fn default_gift_box_count() -> usize {
    12
}

fn default_gift_box_scale() -> f32 {
    0.8
}

fn default_gift_box_palette() -> Vec<u32> {
    GIFT_BOX_PALETTE.to_vec()
}

impl Default for GiftBoxConfig {
    fn default() -> Self {
        Self {
            count: default_gift_box_count(),
            scale: default_gift_box_scale(),
            chaos_radius: default_scatter_radius(),
            outward: default_ornament_outward(),
            palette: default_gift_box_palette(),
        }
    }
}

/// Photo cards: one per participant
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PhotoConfig {
    /// Participant lists longer than this are truncated
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,
    #[serde(default = "default_photo_target_scale")]
    pub target_scale: f32,
    #[serde(default = "default_photo_chaos_scale")]
    pub chaos_scale: f32,
    #[serde(default = "default_photo_chaos_radius")]
    pub chaos_radius: f32,
    #[serde(default = "default_photo_outward")]
    pub outward: f32,
}

fn default_max_participants() -> usize {
    30
}

fn default_photo_target_scale() -> f32 {
    1.0
}

fn default_photo_chaos_scale() -> f32 {
    3.5
}

fn default_photo_chaos_radius() -> f32 {
    12.0
}

fn default_photo_outward() -> f32 {
    1.15
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_participants: default_max_participants(),
            target_scale: default_photo_target_scale(),
            chaos_scale: default_photo_chaos_scale(),
            chaos_radius: default_photo_chaos_radius(),
            outward: default_photo_outward(),
        }
    }
}

// =============================================================================
// Motion
// =============================================================================

/// Per-frame smoothing of the photo cards
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Rate at which a photo's approach value follows the control value
    #[serde(default = "default_approach_rate")]
    pub approach_rate: f32,
    /// Largest frame delta fed into any rate computation
    #[serde(default = "default_max_dt")]
    pub max_dt: f32,
    /// Above this approach value photos face outward instead of the camera
    #[serde(default = "default_billboard_threshold")]
    pub billboard_threshold: f32,
}

fn default_approach_rate() -> f32 {
    2.5
}

fn default_max_dt() -> f32 {
    0.1
}

fn default_billboard_threshold() -> f32 {
    0.8
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            approach_rate: default_approach_rate(),
            max_dt: default_max_dt(),
            billboard_threshold: default_billboard_threshold(),
        }
    }
}

// =============================================================================
// Camera
// =============================================================================

/// Camera rig tunables
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CameraConfig {
    /// Smoothing rate of the pointer offset
    #[serde(default = "default_pointer_rate")]
    pub pointer_rate: f32,
    /// Horizontal gain applied to the pointer before smoothing
    #[serde(default = "default_pointer_x_gain")]
    pub pointer_x_gain: f32,
    /// Smoothed offset to camera x
    #[serde(default = "default_offset_gain_x")]
    pub offset_gain_x: f32,
    /// Smoothed offset to camera y
    #[serde(default = "default_offset_gain_y")]
    pub offset_gain_y: f32,
    #[serde(default = "default_zoom_initial")]
    pub zoom_initial: f32,
    #[serde(default = "default_zoom_min")]
    pub zoom_min: f32,
    #[serde(default = "default_zoom_max")]
    pub zoom_max: f32,
    /// Zoom change per unit of wheel delta
    #[serde(default = "default_wheel_factor")]
    pub wheel_factor: f32,
    /// Idle yaw rate in radians per second
    #[serde(default = "default_idle_spin_rate")]
    pub idle_spin_rate: f32,
    /// Yaw rate while a winner is being picked
    #[serde(default = "default_draw_spin_rate")]
    pub draw_spin_rate: f32,
    /// Easing rate toward a neutral yaw while a winner is staged
    #[serde(default = "default_settle_rate")]
    pub settle_rate: f32,
    /// Easing rate toward the pointer-driven yaw
    #[serde(default = "default_gesture_rate")]
    pub gesture_rate: f32,
}

fn default_pointer_rate() -> f32 {
    4.0
}

fn default_pointer_x_gain() -> f32 {
    1.2
}

fn default_offset_gain_x() -> f32 {
    4.0
}

fn default_offset_gain_y() -> f32 {
    2.0
}

fn default_zoom_initial() -> f32 {
    32.0
}

fn default_zoom_min() -> f32 {
    12.0
}

fn default_zoom_max() -> f32 {
    55.0
}

fn default_wheel_factor() -> f32 {
    0.02
}

fn default_idle_spin_rate() -> f32 {
    0.12
}

fn default_draw_spin_rate() -> f32 {
    7.5
}

fn default_settle_rate() -> f32 {
    2.0
}

fn default_gesture_rate() -> f32 {
    6.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pointer_rate: default_pointer_rate(),
            pointer_x_gain: default_pointer_x_gain(),
            offset_gain_x: default_offset_gain_x(),
            offset_gain_y: default_offset_gain_y(),
            zoom_initial: default_zoom_initial(),
            zoom_min: default_zoom_min(),
            zoom_max: default_zoom_max(),
            wheel_factor: default_wheel_factor(),
            idle_spin_rate: default_idle_spin_rate(),
            draw_spin_rate: default_draw_spin_rate(),
            settle_rate: default_settle_rate(),
            gesture_rate: default_gesture_rate(),
        }
    }
}

// =============================================================================
// Draw
// =============================================================================

/// Lucky draw timing and staging
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DrawConfig {
    /// Seconds of shuffling before a winner is picked
    #[serde(default = "default_pick_delay")]
    pub pick_delay: f32,
    /// Seconds after a participant reload before the tree re-forms
    #[serde(default = "default_reform_delay")]
    pub reform_delay: f32,
    /// Where the winner card is presented, in formation space
    #[serde(default = "default_stage_point")]
    pub stage_point: Vec3,
    /// Uniform scale of the staged card
    #[serde(default = "default_magnification")]
    pub magnification: f32,
    /// Easing rate of the staged card's position, scale and rotation
    #[serde(default = "default_reveal_rate")]
    pub reveal_rate: f32,
    /// Easing rate of the card flip
    #[serde(default = "default_flip_rate")]
    pub flip_rate: f32,
}

fn default_pick_delay() -> f32 {
    3.0
}

fn default_reform_delay() -> f32 {
    2.0
}

fn default_stage_point() -> Vec3 {
    Vec3::new(0.0, 0.0, 22.0)
}

fn default_magnification() -> f32 {
    9.0
}

fn default_reveal_rate() -> f32 {
    5.0
}

fn default_flip_rate() -> f32 {
    7.5
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            pick_delay: default_pick_delay(),
            reform_delay: default_reform_delay(),
            stage_point: default_stage_point(),
            magnification: default_magnification(),
            reveal_rate: default_reveal_rate(),
            flip_rate: default_flip_rate(),
        }
    }
}

/// Resolve a palette of `0xRRGGBB` literals
pub fn palette_colors(palette: &[u32]) -> Vec<Color> {
    palette.iter().copied().map(Color::from_hex).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ArborConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = ArborConfig::from_toml_str(
            r#"
            [camera]
            zoom_initial = 40.0

            [gift_box]
            count = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.camera.zoom_initial, 40.0);
        assert_eq!(config.camera.zoom_max, 55.0);
        assert_eq!(config.gift_box.count, 3);
        assert_eq!(config.gift_box.scale, 0.8);
        assert_eq!(config.gift_box.palette, GIFT_BOX_PALETTE.to_vec());
        assert_eq!(config.bauble, BaubleConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ArborConfig::from_toml_str("").unwrap(), ArborConfig::default());
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        let err = ArborConfig::from_toml_str(
            r#"
            [camera]
            zoom_min = 60.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_palette_rejected() {
        let mut config = ArborConfig::default();
        config.bauble.palette.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = ArborConfig::default();
        config.motion.billboard_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_syntax_is_parse_error() {
        let err = ArborConfig::from_toml_str("[camera\nzoom = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_dump_reloads() {
        let mut config = ArborConfig::default();
        config.draw.pick_delay = 4.5;
        let text = config.to_toml().unwrap();
        assert_eq!(ArborConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ArborConfig::load(Path::new("/nonexistent/arbor.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
