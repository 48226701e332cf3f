//! Lucky draw overlay
//!
//! A four-phase session layered over the normal choreography:
//!
//! ```text
//! Idle --start--> Picking --timer--> Winner --reveal--> Revealed
//!   ^                |                  |                  |
//!   +------reset-----+-------reset------+-------reset------+
//! ```
//!
//! Every started session gets a fresh [`SessionToken`]. The delayed pick
//! carries the token it was scheduled with and is ignored unless the overlay
//! is still picking in that same session, so a reset can never be undone by a
//! late timer.

mod stage;

pub use stage::StageParams;

use crate::error::DrawError;
use arbor_core::ImageHandle;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

/// Draw session phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    #[default]
    Idle,
    /// Shuffling, winner not chosen yet
    Picking,
    /// Winner staged, card face up
    Winner,
    /// Winner card flipped to show the prize
    Revealed,
}

impl DrawPhase {
    /// Whether the winner card is held on stage
    pub fn is_staged(self) -> bool {
        matches!(self, DrawPhase::Winner | DrawPhase::Revealed)
    }

    /// Card flip the staged winner eases toward
    pub fn flip_target(self) -> f32 {
        match self {
            DrawPhase::Revealed => PI,
            _ => 0.0,
        }
    }
}

impl fmt::Display for DrawPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DrawPhase::Idle => "idle",
            DrawPhase::Picking => "picking",
            DrawPhase::Winner => "showing a winner",
            DrawPhase::Revealed => "revealed",
        };
        f.write_str(name)
    }
}

/// Identity of one draw session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

/// Draw session state machine
#[derive(Clone, Debug, Default)]
pub struct DrawOverlay {
    phase: DrawPhase,
    session: u64,
    winner: Option<usize>,
    prize: Option<ImageHandle>,
}

impl DrawOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    /// Token of the current session
    pub fn token(&self) -> SessionToken {
        SessionToken(self.session)
    }

    /// Chosen participant index, set from `Winner` until reset
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn prize(&self) -> Option<ImageHandle> {
        self.prize
    }

    /// Winner index while its card is held on stage
    pub fn staged_winner(&self) -> Option<usize> {
        if self.phase.is_staged() {
            self.winner
        } else {
            None
        }
    }

    pub fn is_winner(&self, index: usize) -> bool {
        self.staged_winner() == Some(index)
    }

    /// Begin shuffling among `participants`
    ///
    /// Returns the token the delayed pick must present.
    pub fn start(&mut self, participants: usize) -> Result<SessionToken, DrawError> {
        if self.phase != DrawPhase::Idle {
            return Err(DrawError::InvalidTransition {
                phase: self.phase,
                action: "start a draw",
            });
        }
        if participants == 0 {
            return Err(DrawError::NoParticipants);
        }

        self.session += 1;
        self.phase = DrawPhase::Picking;
        self.winner = None;
        self.prize = None;
        tracing::info!(
            "Draw started: session {} with {} participants",
            self.session,
            participants
        );
        Ok(self.token())
    }

    /// Choose the winner and prize for the session `token` belongs to
    ///
    /// The winner is drawn uniformly from `participants` as it stands now and
    /// the prize uniformly from `prizes`. A token from an ended session is
    /// ignored. With no participants left the session falls back to `Idle`.
    pub fn complete_pick<R: Rng + ?Sized>(
        &mut self,
        token: SessionToken,
        participants: usize,
        prizes: &[ImageHandle],
        rng: &mut R,
    ) -> Option<usize> {
        if self.phase != DrawPhase::Picking || token != self.token() {
            tracing::debug!(
                "Ignoring stale pick for session {} (current {}, {})",
                token.0,
                self.session,
                self.phase
            );
            return None;
        }

        if participants == 0 {
            tracing::warn!("Participants left during the draw, returning to idle");
            self.abandon();
            return None;
        }

        let winner = rng.random_range(0..participants);
        let prize = if prizes.is_empty() {
            None
        } else {
            Some(prizes[rng.random_range(0..prizes.len())])
        };

        self.winner = Some(winner);
        self.prize = prize;
        self.phase = DrawPhase::Winner;
        tracing::info!(
            "Draw session {}: winner #{} prize {:?}",
            self.session,
            winner,
            prize.map(|p| p.id)
        );
        Some(winner)
    }

    /// Flip the winner card to show the prize
    pub fn reveal(&mut self) -> Result<(), DrawError> {
        if self.phase != DrawPhase::Winner {
            return Err(DrawError::InvalidTransition {
                phase: self.phase,
                action: "reveal",
            });
        }
        self.phase = DrawPhase::Revealed;
        tracing::info!("Draw session {}: prize revealed", self.session);
        Ok(())
    }

    /// End the session from any active phase
    ///
    /// Returns `false` when there was nothing to reset.
    pub fn reset(&mut self) -> bool {
        if self.phase == DrawPhase::Idle {
            return false;
        }
        tracing::info!("Draw session {} reset from {}", self.session, self.phase);
        self.abandon();
        true
    }

    /// Drop a staged winner that no longer has a card among `participants`
    ///
    /// Returns `true` when the session was abandoned back to `Idle`.
    pub fn retain_participants(&mut self, participants: usize) -> bool {
        match self.staged_winner() {
            Some(winner) if winner >= participants => {
                tracing::warn!(
                    "Winner #{} left with the participant reload, returning to idle",
                    winner
                );
                self.abandon();
                true
            }
            _ => false,
        }
    }

    fn abandon(&mut self) {
        self.session += 1;
        self.phase = DrawPhase::Idle;
        self.winner = None;
        self.prize = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn prizes() -> Vec<ImageHandle> {
        vec![ImageHandle::new(100), ImageHandle::new(101)]
    }

    #[test]
    fn test_start_without_participants_rejected() {
        let mut overlay = DrawOverlay::new();
        assert_eq!(overlay.start(0), Err(DrawError::NoParticipants));
        assert_eq!(overlay.phase(), DrawPhase::Idle);
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut overlay = DrawOverlay::new();
        overlay.start(3).unwrap();
        let err = overlay.start(3).unwrap_err();
        assert!(matches!(
            err,
            DrawError::InvalidTransition {
                phase: DrawPhase::Picking,
                ..
            }
        ));
    }

    #[test]
    fn test_pick_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let mut overlay = DrawOverlay::new();
            let token = overlay.start(5).unwrap();
            let winner = overlay.complete_pick(token, 5, &prizes(), &mut rng).unwrap();
            assert!(winner < 5);
            assert_eq!(overlay.phase(), DrawPhase::Winner);
            assert!(overlay.prize().is_some());
        }
    }

    #[test]
    fn test_empty_prize_pool_is_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut overlay = DrawOverlay::new();
        let token = overlay.start(1).unwrap();
        assert_eq!(overlay.complete_pick(token, 1, &[], &mut rng), Some(0));
        assert_eq!(overlay.prize(), None);
    }

    #[test]
    fn test_stale_token_ignored_after_reset() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut overlay = DrawOverlay::new();
        let old = overlay.start(4).unwrap();
        assert!(overlay.reset());

        assert_eq!(overlay.complete_pick(old, 4, &prizes(), &mut rng), None);
        assert_eq!(overlay.phase(), DrawPhase::Idle);
        assert_eq!(overlay.winner(), None);

        // a new session does not accept the old token either
        let new = overlay.start(4).unwrap();
        assert_ne!(old, new);
        assert_eq!(overlay.complete_pick(old, 4, &prizes(), &mut rng), None);
        assert_eq!(overlay.phase(), DrawPhase::Picking);
    }

    #[test]
    fn test_participants_gone_abandons_session() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut overlay = DrawOverlay::new();
        let token = overlay.start(2).unwrap();
        assert_eq!(overlay.complete_pick(token, 0, &prizes(), &mut rng), None);
        assert_eq!(overlay.phase(), DrawPhase::Idle);
    }

    #[test]
    fn test_shrunk_list_drops_staged_winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut overlay = DrawOverlay::new();
        let token = overlay.start(5).unwrap();
        let winner = overlay.complete_pick(token, 5, &prizes(), &mut rng).unwrap();

        assert!(!overlay.retain_participants(winner + 1));
        assert_eq!(overlay.phase(), DrawPhase::Winner);

        overlay.reveal().unwrap();
        let before = overlay.token();
        assert!(overlay.retain_participants(winner));
        assert_eq!(overlay.phase(), DrawPhase::Idle);
        assert_eq!(overlay.winner(), None);
        assert_eq!(overlay.prize(), None);
        assert_ne!(overlay.token(), before);
    }

    #[test]
    fn test_retain_ignored_without_staged_winner() {
        let mut overlay = DrawOverlay::new();
        assert!(!overlay.retain_participants(0));
        overlay.start(3).unwrap();
        assert!(!overlay.retain_participants(0));
        assert_eq!(overlay.phase(), DrawPhase::Picking);
    }

    #[test]
    fn test_reveal_only_from_winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut overlay = DrawOverlay::new();
        assert!(overlay.reveal().is_err());

        let token = overlay.start(3).unwrap();
        assert!(overlay.reveal().is_err());

        overlay.complete_pick(token, 3, &prizes(), &mut rng);
        overlay.reveal().unwrap();
        assert_eq!(overlay.phase(), DrawPhase::Revealed);
        assert_eq!(overlay.phase().flip_target(), PI);
        assert!(overlay.reveal().is_err());
    }

    #[test]
    fn test_reset_clears_winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut overlay = DrawOverlay::new();
        let token = overlay.start(3).unwrap();
        let winner = overlay.complete_pick(token, 3, &prizes(), &mut rng).unwrap();
        assert!(overlay.is_winner(winner));

        assert!(overlay.reset());
        assert_eq!(overlay.winner(), None);
        assert_eq!(overlay.prize(), None);
        assert!(!overlay.is_winner(winner));
        assert!(!overlay.reset());
    }

    #[test]
    fn test_single_staged_winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut overlay = DrawOverlay::new();
        let token = overlay.start(6).unwrap();
        overlay.complete_pick(token, 6, &prizes(), &mut rng);
        let staged = (0..6).filter(|&i| overlay.is_winner(i)).count();
        assert_eq!(staged, 1);
    }
}
