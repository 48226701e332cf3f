//! Director
//!
//! The one place external triggers and the frame loop meet. Triggers
//! (gestures, toggles, wheel input, participant reloads, draw buttons) mutate
//! the director between frames; [`Director::frame`] then fires due timers,
//! snapshots the inputs and runs the camera rig and the formation pass on
//! that snapshot.
//!
//! # Example
//!
//! ```
//! use arbor_3d::prelude::*;
//!
//! let mut director = Director::with_seed(ArborConfig::default(), 7).unwrap();
//! director.set_participants((0..5).map(ImageHandle::new).collect());
//! director.set_prizes(vec![ImageHandle::new(100), ImageHandle::new(101)]);
//!
//! director.start_draw().unwrap();
//! for _ in 0..200 {
//!     director.frame(1.0 / 60.0);
//! }
//! assert_eq!(director.phase(), DrawPhase::Winner);
//! assert!(director.winner().unwrap() < 5);
//! ```

use crate::camera::{CameraRig, CameraUpdateContext, PointerSample};
use crate::config::ArborConfig;
use crate::control::{FormationControl, HandGesture, FORMED, SCATTERED};
use crate::draw::{DrawOverlay, DrawPhase, SessionToken};
use crate::error::{ConfigError, DrawError};
use crate::formation::Formation;
use crate::frame::{FrameAssets, FrameOutput, FrameSnapshot};
use arbor_animation::{FrameClock, TimerId, TimerScheduler};
use arbor_core::{ImageHandle, TextureHandle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Delayed events the director schedules on itself
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DirectorEvent {
    /// Pick the winner for a draw session
    PickWinner(SessionToken),
    /// Re-form the tree after a participant reload
    Reform,
}

/// Drives the whole scene from external triggers and frame ticks
pub struct Director<R: Rng = ChaCha8Rng> {
    config: ArborConfig,
    clock: FrameClock,
    timers: TimerScheduler<DirectorEvent>,
    pending_pick: Option<TimerId>,
    pending_reform: Option<TimerId>,

    control: FormationControl,
    pointer: PointerSample,
    rig: CameraRig,
    overlay: DrawOverlay,
    formation: Formation,

    participants: Vec<ImageHandle>,
    prizes: Vec<ImageHandle>,
    caption: Option<TextureHandle>,

    rng: R,
}

impl Director<ChaCha8Rng> {
    /// Director seeded from the thread RNG
    pub fn new(config: ArborConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Director with reproducible layouts and draws
    pub fn with_seed(config: ArborConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Director<R> {
    pub fn with_rng(config: ArborConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let formation = Formation::new(&config, &mut rng);
        tracing::info!(
            "Director ready: {} baubles, {} gift boxes",
            formation.ornaments(crate::ornament::Category::Bauble).len(),
            formation.ornaments(crate::ornament::Category::GiftBox).len()
        );

        Ok(Self {
            clock: FrameClock::new(config.motion.max_dt),
            timers: TimerScheduler::new(),
            pending_pick: None,
            pending_reform: None,
            control: FormationControl::new(),
            pointer: PointerSample::default(),
            rig: CameraRig::new(&config.camera),
            overlay: DrawOverlay::new(),
            formation,
            participants: Vec::new(),
            prizes: Vec::new(),
            caption: None,
            rng,
            config,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &ArborConfig {
        &self.config
    }

    pub fn phase(&self) -> DrawPhase {
        self.overlay.phase()
    }

    pub fn winner(&self) -> Option<usize> {
        self.overlay.winner()
    }

    pub fn prize(&self) -> Option<ImageHandle> {
        self.overlay.prize()
    }

    /// Requested formation amount
    pub fn control(&self) -> f32 {
        self.control.value()
    }

    pub fn pointer(&self) -> PointerSample {
        self.pointer
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn overlay(&self) -> &DrawOverlay {
        &self.overlay
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn participants(&self) -> &[ImageHandle] {
        &self.participants
    }

    /// Whether a winner pick is still scheduled
    pub fn pick_pending(&self) -> bool {
        self.pending_pick
            .is_some_and(|id| self.timers.is_pending(id))
    }

    /// Whether a re-form after a reload is still scheduled
    pub fn reform_pending(&self) -> bool {
        self.pending_reform
            .is_some_and(|id| self.timers.is_pending(id))
    }

    // =========================================================================
    // Input triggers
    // =========================================================================

    /// Latest raw pointer sample
    pub fn set_pointer(&mut self, sample: PointerSample) {
        self.pointer = sample;
    }

    /// Classified hand gesture: moves the pointer and, when enabled, the
    /// formation amount
    pub fn apply_gesture(&mut self, gesture: HandGesture) {
        self.pointer = gesture.pointer(self.pointer);
        if self.control.apply_gesture(&gesture) {
            tracing::debug!("Gesture set formation to {}", self.control.value());
        }
    }

    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        self.control.set_gestures_enabled(enabled);
    }

    /// Manual formed / scattered toggle
    pub fn toggle_formation(&mut self) -> f32 {
        let value = self.control.toggle();
        tracing::debug!("Formation toggled to {}", value);
        value
    }

    /// Wheel input
    pub fn zoom(&mut self, delta: f32) {
        self.rig.apply_zoom(delta);
    }

    /// Replace the participant photos
    ///
    /// The list is capped at the configured maximum. The formation scatters,
    /// photo cards are regenerated if the count changed, and the tree re-forms
    /// after the reform delay. A newer reload supersedes a pending re-form. A
    /// staged winner whose card is gone ends the draw session.
    pub fn set_participants(&mut self, mut participants: Vec<ImageHandle>) {
        let max = self.config.photo.max_participants;
        if participants.len() > max {
            tracing::warn!(
                "Received {} participants, keeping the first {}",
                participants.len(),
                max
            );
            participants.truncate(max);
        }
        if self.overlay.phase() != DrawPhase::Idle {
            tracing::warn!("Participants replaced during a draw ({})", self.overlay.phase());
        }

        self.overlay.retain_participants(participants.len());
        self.formation.sync_photos(participants.len(), &mut self.rng);
        self.participants = participants;
        tracing::info!("Loaded {} participants", self.participants.len());

        self.control.request(SCATTERED);
        if let Some(id) = self.pending_reform.take() {
            self.timers.cancel(id);
        }
        self.pending_reform = Some(
            self.timers
                .schedule(self.config.draw.reform_delay, DirectorEvent::Reform),
        );
    }

    /// Replace the prize pool used by the next winner pick
    pub fn set_prizes(&mut self, prizes: Vec<ImageHandle>) {
        tracing::info!("Loaded {} prizes", prizes.len());
        self.prizes = prizes;
    }

    /// Caption texture shown on the photo cards
    pub fn set_caption(&mut self, caption: Option<TextureHandle>) {
        self.caption = caption;
    }

    // =========================================================================
    // Draw session
    // =========================================================================

    /// Start shuffling; the winner is picked after the pick delay
    pub fn start_draw(&mut self) -> Result<(), DrawError> {
        let token = match self.overlay.start(self.participants.len()) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("Draw start rejected: {}", err);
                return Err(err);
            }
        };

        self.control.request(SCATTERED);
        if let Some(id) = self.pending_reform.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.pending_pick.take() {
            self.timers.cancel(id);
        }
        self.pending_pick = Some(self.timers.schedule(
            self.config.draw.pick_delay,
            DirectorEvent::PickWinner(token),
        ));
        Ok(())
    }

    /// Flip the winner card to show the prize
    pub fn reveal(&mut self) -> Result<(), DrawError> {
        self.overlay.reveal().map_err(|err| {
            tracing::warn!("Reveal rejected: {}", err);
            err
        })
    }

    /// End the draw session and re-form the tree
    ///
    /// Accepted from any active phase; a no-op while idle.
    pub fn reset_draw(&mut self) {
        if let Some(id) = self.pending_pick.take() {
            self.timers.cancel(id);
        }
        if self.overlay.reset() {
            self.control.request(FORMED);
        }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the scene by the host's raw frame delta
    pub fn frame(&mut self, raw_dt: f32) -> FrameOutput {
        let time = self.clock.tick(raw_dt);

        for event in self.timers.advance(time.raw_dt) {
            self.handle_event(event);
        }

        let snapshot = FrameSnapshot {
            dt: time.dt,
            elapsed: time.elapsed,
            frame: time.frame,
            control: self.control.value(),
            pointer: self.pointer,
            phase: self.overlay.phase(),
            staged_winner: self.overlay.staged_winner(),
        };

        let camera = self.rig.update(
            &CameraUpdateContext {
                dt: snapshot.dt,
                phase: snapshot.phase,
            },
            &snapshot.pointer,
        );

        let assets = FrameAssets {
            participants: &self.participants,
            caption: self.caption,
            prize: self.overlay.prize(),
        };
        let instances = self
            .formation
            .update(&snapshot, camera.local_position(), &assets);

        FrameOutput {
            frame: snapshot.frame,
            elapsed: snapshot.elapsed,
            control: snapshot.control,
            phase: snapshot.phase,
            winner: self.overlay.winner(),
            prize: self.overlay.prize(),
            camera,
            instances,
        }
    }

    fn handle_event(&mut self, event: DirectorEvent) {
        match event {
            DirectorEvent::PickWinner(token) => {
                self.pending_pick = None;
                self.overlay.complete_pick(
                    token,
                    self.participants.len(),
                    &self.prizes,
                    &mut self.rng,
                );
            }
            DirectorEvent::Reform => {
                self.pending_reform = None;
                if self.overlay.phase() == DrawPhase::Idle {
                    self.control.request(FORMED);
                    tracing::debug!("Re-formed after participant reload");
                }
            }
        }
    }
}

impl<R: Rng> std::fmt::Debug for Director<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("phase", &self.overlay.phase())
            .field("control", &self.control.value())
            .field("participants", &self.participants.len())
            .field("prizes", &self.prizes.len())
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn director() -> Director {
        Director::with_seed(ArborConfig::default(), 1).unwrap()
    }

    fn run(director: &mut Director, seconds: f32) -> FrameOutput {
        let steps = (seconds * 60.0).ceil() as usize;
        let mut out = director.frame(0.0);
        for _ in 0..steps {
            out = director.frame(1.0 / 60.0);
        }
        out
    }

    fn images(n: u64) -> Vec<ImageHandle> {
        (0..n).map(ImageHandle::new).collect()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ArborConfig::default();
        config.camera.zoom_min = 100.0;
        assert!(Director::with_seed(config, 0).is_err());
    }

    #[test]
    fn test_draw_without_participants() {
        let mut director = director();
        assert_eq!(director.start_draw(), Err(DrawError::NoParticipants));
        assert_eq!(director.phase(), DrawPhase::Idle);
        assert_eq!(director.control(), FORMED);
    }

    #[test]
    fn test_reload_scatters_then_reforms() {
        let mut director = director();
        director.set_participants(images(4));
        assert_eq!(director.control(), SCATTERED);
        assert_eq!(director.formation().photo_count(), 4);

        run(&mut director, 1.0);
        assert_eq!(director.control(), SCATTERED);
        director.set_participants(images(4));
        run(&mut director, 1.5);
        // the first reload's re-form was superseded
        assert_eq!(director.control(), SCATTERED);
        run(&mut director, 1.0);
        assert_eq!(director.control(), FORMED);
        assert!(!director.reform_pending());
    }

    #[test]
    fn test_participants_capped() {
        let mut director = director();
        director.set_participants(images(45));
        assert_eq!(director.participants().len(), 30);
        assert_eq!(director.formation().photo_count(), 30);
    }

    #[test]
    fn test_reload_without_winner_card_ends_draw() {
        let mut director = director();
        director.set_participants(images(5));
        run(&mut director, 2.5);
        director.start_draw().unwrap();
        run(&mut director, 3.1);
        let winner = director.winner().unwrap();

        // same size keeps the session
        director.set_participants(images(5));
        assert_eq!(director.phase(), DrawPhase::Winner);
        assert_eq!(director.winner(), Some(winner));

        director.set_participants(images(winner as u64));
        assert_eq!(director.phase(), DrawPhase::Idle);
        assert_eq!(director.winner(), None);
        let out = run(&mut director, 2.5);
        assert_eq!(out.phase, DrawPhase::Idle);
        assert_eq!(director.control(), FORMED);
    }

    #[test]
    fn test_draw_cancels_pending_reform() {
        let mut director = director();
        director.set_participants(images(3));
        director.start_draw().unwrap();
        assert!(!director.reform_pending());
        run(&mut director, 2.5);
        assert_eq!(director.phase(), DrawPhase::Picking);
        assert_eq!(director.control(), SCATTERED);
    }

    #[test]
    fn test_toggle_and_gesture() {
        let mut director = director();
        assert_eq!(director.toggle_formation(), SCATTERED);
        director.apply_gesture(HandGesture::closed(0.3, 0.1));
        assert_eq!(director.control(), FORMED);
        assert_eq!(director.pointer(), PointerSample::new(0.3, 0.1, true));

        director.set_gestures_enabled(false);
        director.apply_gesture(HandGesture::open(0.3, 0.1));
        assert_eq!(director.control(), FORMED);

        director.apply_gesture(HandGesture::lost());
        assert_eq!(director.pointer(), PointerSample::new(0.3, 0.1, false));
    }

    #[test]
    fn test_stalled_frame_does_not_jump_poses() {
        let mut director = director();
        director.set_participants(images(2));
        run(&mut director, 3.0);
        let before = director.formation().ornaments(crate::ornament::Category::Photo)[0]
            .motion()
            .unwrap()
            .approach;
        director.toggle_formation();
        director.frame(5.0);
        let after = director.formation().ornaments(crate::ornament::Category::Photo)[0]
            .motion()
            .unwrap()
            .approach;
        // one clamped step at 2.5/s covers a quarter of the distance
        assert!((before - after - before * 0.25).abs() < 1e-3);
    }
}
