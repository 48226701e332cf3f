//! Layout generator
//!
//! Produces the two candidate poses every ornament moves between: a target
//! pose on the tree surface and a scattered chaos pose.
//!
//! Target positions follow a phyllotaxis spiral. Ornament `i` of `count` sits at
//! progress `p = sqrt((i + 1) / count) * spread` down the cone, at radius
//! `p * base_radius`, height `apex - p * tree_height` and azimuth
//! `i * GOLDEN_ANGLE`. The point is then pushed outward by the category's
//! factor so larger ornaments clear the bauble layer. Targets depend only on
//! `(count, category)`; chaos poses draw from the supplied random source.

use crate::config::ArborConfig;
use crate::ornament::Category;
use arbor_core::{Pose, Quat, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// `π (3 - √5)`, the azimuth step between neighbouring ornaments
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Placement parameters of one ornament category
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryShape {
    /// Multiplier applied to the target position
    pub outward: f32,
    /// Radius of the chaos sphere
    pub chaos_radius: f32,
    /// Uniform scale on the tree
    pub target_scale: f32,
    /// Uniform scale while scattered
    pub chaos_scale: f32,
}

/// Target and chaos poses for one category, index-aligned
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub targets: Vec<Pose>,
    pub chaos: Vec<Pose>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Generates ornament layouts from the configured tree shape
#[derive(Clone, Debug)]
pub struct LayoutGenerator {
    tree_height: f32,
    base_radius: f32,
    apex: f32,
    spread: f32,
    bauble: CategoryShape,
    gift_box: CategoryShape,
    photo: CategoryShape,
}

impl LayoutGenerator {
    pub fn new(config: &ArborConfig) -> Self {
        Self {
            tree_height: config.layout.tree_height,
            base_radius: config.layout.base_radius,
            apex: config.layout.apex,
            spread: config.layout.spread,
            bauble: CategoryShape {
                outward: config.bauble.outward,
                chaos_radius: config.bauble.chaos_radius,
                target_scale: config.bauble.scale,
                chaos_scale: config.bauble.scale,
            },
            gift_box: CategoryShape {
                outward: config.gift_box.outward,
                chaos_radius: config.gift_box.chaos_radius,
                target_scale: config.gift_box.scale,
                chaos_scale: config.gift_box.scale,
            },
            photo: CategoryShape {
                outward: config.photo.outward,
                chaos_radius: config.photo.chaos_radius,
                target_scale: config.photo.target_scale,
                chaos_scale: config.photo.chaos_scale,
            },
        }
    }

    pub fn shape(&self, category: Category) -> CategoryShape {
        match category {
            Category::Bauble => self.bauble,
            Category::GiftBox => self.gift_box,
            Category::Photo => self.photo,
        }
    }

    /// Both pose sets for `count` ornaments of `category`
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        category: Category,
        rng: &mut R,
    ) -> Layout {
        let layout = Layout {
            targets: self.target_poses(count, category),
            chaos: self.chaos_poses(count, category, rng),
        };
        tracing::debug!("Generated {:?} layout for {} ornaments", category, count);
        layout
    }

    /// Spiral placement on the tree surface, deterministic in `(count, category)`
    pub fn target_poses(&self, count: usize, category: Category) -> Vec<Pose> {
        let shape = self.shape(category);
        (0..count)
            .map(|i| {
                let p = ((i + 1) as f32 / count as f32).sqrt() * self.spread;
                let r = p * self.base_radius;
                let y = self.apex - p * self.tree_height;
                let theta = i as f32 * GOLDEN_ANGLE;
                let (sin, cos) = theta.sin_cos();
                let position = Vec3::new(r * cos, y, r * sin) * shape.outward;
                Pose::at(position).with_scale(Vec3::splat(shape.target_scale))
            })
            .collect()
    }

    /// Uniform points inside the category's chaos sphere, each with a random tilt
    pub fn chaos_poses<R: Rng + ?Sized>(
        &self,
        count: usize,
        category: Category,
        rng: &mut R,
    ) -> Vec<Pose> {
        let shape = self.shape(category);
        (0..count)
            .map(|_| {
                let position = random_in_sphere(rng, shape.chaos_radius);
                let tilt = Quat::from_euler(rng.random::<f32>() * PI, rng.random::<f32>() * PI, 0.0);
                Pose::at(position)
                    .with_rotation(tilt)
                    .with_scale(Vec3::splat(shape.chaos_scale))
            })
            .collect()
    }
}

/// Uniform sample inside a sphere of `radius` around the origin
fn random_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.random::<f32>() * TAU;
    let phi = (1.0 - 2.0 * rng.random::<f32>()).clamp(-1.0, 1.0).acos();
    let r = rng.random::<f32>().cbrt() * radius;
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * cos_phi,
        r * sin_phi * theta.sin(),
    )
}
