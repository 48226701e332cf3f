//! Formation
//!
//! Owns every ornament and runs the per-frame pose pass. Baubles and gift
//! boxes are created once from the configured counts; photo cards follow the
//! participant list and are regenerated when its length changes.

use crate::config::{palette_colors, ArborConfig};
use crate::frame::{FrameAssets, FrameSnapshot, PhotoPayload, RenderInstance, VisualPayload};
use crate::layout::LayoutGenerator;
use crate::ornament::{CardLayout, Category, Ornament, OrnamentKind};
use crate::transition::{PoseInput, TransitionDriver};
use arbor_core::{Color, Vec3};
use rand::Rng;

/// All ornaments of the scene
#[derive(Clone, Debug)]
pub struct Formation {
    generator: LayoutGenerator,
    driver: TransitionDriver,
    baubles: Vec<Ornament>,
    gift_boxes: Vec<Ornament>,
    photos: Vec<Ornament>,
}

impl Formation {
    /// Build the baubles and gift boxes; photos start empty
    pub fn new<R: Rng + ?Sized>(config: &ArborConfig, rng: &mut R) -> Self {
        let generator = LayoutGenerator::new(config);

        let bauble_palette = palette_colors(&config.bauble.palette);
        let layout = generator.generate(config.bauble.count, Category::Bauble, rng);
        let baubles = layout
            .targets
            .into_iter()
            .zip(layout.chaos)
            .enumerate()
            .map(|(i, (target, chaos))| {
                Ornament::bauble(i, target, chaos, cycle(&bauble_palette, i))
            })
            .collect();

        let gift_palette = palette_colors(&config.gift_box.palette);
        let layout = generator.generate(config.gift_box.count, Category::GiftBox, rng);
        let gift_boxes = layout
            .targets
            .into_iter()
            .zip(layout.chaos)
            .enumerate()
            .map(|(i, (target, chaos))| {
                Ornament::gift_box(i, target, chaos, cycle(&gift_palette, i))
            })
            .collect();

        Self {
            generator,
            driver: TransitionDriver::new(config),
            baubles,
            gift_boxes,
            photos: Vec::new(),
        }
    }

    pub fn ornaments(&self, category: Category) -> &[Ornament] {
        match category {
            Category::Bauble => &self.baubles,
            Category::GiftBox => &self.gift_boxes,
            Category::Photo => &self.photos,
        }
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// Total ornaments across all categories
    pub fn len(&self) -> usize {
        self.baubles.len() + self.gift_boxes.len() + self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Match the photo cards to `count` participants
    ///
    /// Poses are regenerated only when the count changes, so a reload with the
    /// same number of participants keeps every card's layout and smoothing
    /// state. Returns whether the cards were regenerated.
    pub fn sync_photos<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> bool {
        if count == self.photos.len() {
            return false;
        }

        let layout = self.generator.generate(count, Category::Photo, rng);
        self.photos = layout
            .targets
            .into_iter()
            .zip(layout.chaos)
            .enumerate()
            .map(|(i, (target, chaos))| Ornament::photo(i, target, chaos))
            .collect();
        tracing::debug!("Regenerated {} photo cards", count);
        true
    }

    /// Advance every ornament one frame and collect what to draw
    ///
    /// `camera_local` is the camera position in formation-local space. Photos
    /// without a participant image are still advanced but not emitted.
    pub fn update(
        &mut self,
        snapshot: &FrameSnapshot,
        camera_local: Vec3,
        assets: &FrameAssets<'_>,
    ) -> Vec<RenderInstance> {
        let input = PoseInput {
            dt: snapshot.dt,
            control: snapshot.control,
            camera: camera_local,
            staged: snapshot.staged_winner,
            flip_target: snapshot.phase.flip_target(),
        };

        let mut instances = Vec::with_capacity(self.len());
        let driver = &self.driver;

        for ornament in self.baubles.iter_mut().chain(self.gift_boxes.iter_mut()) {
            let pose = driver.update(ornament, &input);
            let color = match ornament.kind() {
                OrnamentKind::Bauble { color } | OrnamentKind::GiftBox { color, .. } => *color,
                OrnamentKind::Photo(_) => Color::WHITE,
            };
            instances.push(RenderInstance {
                category: ornament.category(),
                index: ornament.index(),
                pose,
                payload: VisualPayload::Color(color),
            });
        }

        let mut skipped = 0usize;
        for ornament in &mut self.photos {
            let pose = driver.update(ornament, &input);
            let index = ornament.index();

            let Some(image) = assets.participants.get(index).copied() else {
                skipped += 1;
                continue;
            };

            let winner = snapshot.staged_winner == Some(index);
            let flip = ornament.motion().map(|m| m.flip).unwrap_or(0.0);
            instances.push(RenderInstance {
                category: Category::Photo,
                index,
                pose,
                payload: VisualPayload::Photo(PhotoPayload {
                    image,
                    card: CardLayout::from_aspect(image.aspect()),
                    flip,
                    caption: if winner { None } else { assets.caption },
                    winner,
                    prize: if winner { assets.prize } else { None },
                }),
            });
        }

        if skipped > 0 {
            tracing::trace!("Skipped {} photo cards without an image", skipped);
        }

        instances
    }
}

fn cycle(palette: &[Color], index: usize) -> Color {
    if palette.is_empty() {
        Color::WHITE
    } else {
        palette[index % palette.len()]
    }
}
