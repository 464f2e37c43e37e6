//! Game lifecycle state machine
//!
//! ```text
//! Loading ──ok──▶ Ready ──start──▶ Playing ──fall──▶ GameOver(AwaitingName)
//!    │              ▲                                   │          │
//!    │              │◀──────────── declined ────────────┘          ▼
//!    │              └─────────── finished ──────────── GameOver(Submitting)
//!    └──fail──▶ Error ◀── any fatal fault
//! ```
//!
//! Asynchronous completions (asset load, score submission) carry the round
//! they belong to and are ignored if the app has moved on.

use crate::error::{AssetError, FatalError, ScoreError};
use crate::persistence::Submission;
use crate::platform::FrameClock;
use crate::sim::{GameEvent, RoundState, TickInput, tick};

/// What the game-over screen is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverStage {
    /// Waiting for the player to enter or decline a name
    AwaitingName,
    /// A score submission is in flight
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Playing,
    GameOver(GameOverStage),
    Error,
}

/// Result of driving one animation frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not playing; don't reschedule
    Idle,
    /// Round continues; schedule the next frame
    Continue,
    /// The round just ended with this score
    Ended { score: u64 },
}

/// A submission handed to the score reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub round_id: u64,
    pub submission: Submission,
}

/// Lifecycle owner: one round at a time, driven by frames and UI actions
#[derive(Debug)]
pub struct App {
    phase: Phase,
    round: Option<RoundState>,
    /// Increments on every start; stale async completions compare against it
    round_id: u64,
    clock: FrameClock,
    last_error: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            round: None,
            round_id: 0,
            clock: FrameClock::new(),
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    /// Score of the current (or just-finished) round
    pub fn score(&self) -> u64 {
        self.round.as_ref().map_or(0, |r| r.score)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Asset loading settled. Only meaningful while loading.
    pub fn assets_loaded(&mut self, result: Result<(), AssetError>) -> bool {
        if self.phase != Phase::Loading {
            return false;
        }
        match result {
            Ok(()) => {
                log::info!("Assets loaded, ready");
                self.phase = Phase::Ready;
            }
            Err(e) => self.fail(FatalError::from(e)),
        }
        true
    }

    /// Enter the terminal error phase
    pub fn fail(&mut self, err: FatalError) {
        log::error!("Fatal: {}", err);
        self.last_error = Some(err.to_string());
        self.phase = Phase::Error;
    }

    /// Start a fresh round. No-op unless Ready.
    pub fn start(&mut self, seed: u64, now_ms: f64) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.round_id += 1;
        self.round = Some(RoundState::new(seed));
        self.clock.restart(now_ms);
        self.phase = Phase::Playing;
        log::info!("Round {} started with seed {}", self.round_id, seed);
        true
    }

    /// Run one frame at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> FrameOutcome {
        if self.phase != Phase::Playing {
            return FrameOutcome::Idle;
        }
        let dt = self.clock.delta(now_ms);
        let Some(round) = self.round.as_mut() else {
            return FrameOutcome::Idle;
        };
        tick(round, input, dt);

        if round.over {
            let score = round.score;
            self.game_over();
            FrameOutcome::Ended { score }
        } else {
            FrameOutcome::Continue
        }
    }

    /// Take the events from the current round
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.round
            .as_mut()
            .map(RoundState::drain_events)
            .unwrap_or_default()
    }

    /// End the round. No-op unless Playing.
    pub fn game_over(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        log::info!("Game over, score {}", self.score());
        self.phase = Phase::GameOver(GameOverStage::AwaitingName);
        true
    }

    /// Name entry finished. `None` or a blank name declines submission and
    /// returns to Ready. Returns the submission to send, if any.
    pub fn name_entered(&mut self, name: Option<&str>) -> Option<PendingSubmission> {
        if self.phase != Phase::GameOver(GameOverStage::AwaitingName) {
            return None;
        }
        let score = i64::try_from(self.score()).unwrap_or(i64::MAX);
        match name.map(|n| Submission::new(n, score)) {
            Some(Ok(submission)) => {
                self.phase = Phase::GameOver(GameOverStage::Submitting);
                Some(PendingSubmission {
                    round_id: self.round_id,
                    submission,
                })
            }
            Some(Err(e)) => {
                log::info!("Score not submitted: {}", e);
                self.phase = Phase::Ready;
                None
            }
            None => {
                log::info!("Player declined to submit score");
                self.phase = Phase::Ready;
                None
            }
        }
    }

    /// The score reporter finished. Stale completions are ignored.
    pub fn submission_finished(&mut self, round_id: u64, result: &Result<(), ScoreError>) -> bool {
        if round_id != self.round_id || self.phase != Phase::GameOver(GameOverStage::Submitting) {
            log::warn!("Ignoring stale submission result for round {}", round_id);
            return false;
        }
        match result {
            Ok(()) => log::info!("Score submitted"),
            Err(e) => log::warn!("Score submission failed: {}", e),
        }
        self.phase = Phase::Ready;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn ready_app() -> App {
        let mut app = App::new();
        assert!(app.assets_loaded(Ok(())));
        app
    }

    fn played_out(app: &mut App) -> u64 {
        app.start(42, 0.0);
        // Remove every ledge so the player falls after the first jump
        let mut now = 0.0;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        loop {
            now += 16.0;
            match app.frame(now, &jump) {
                FrameOutcome::Continue => {
                    if let Some(round) = app.round.as_mut() {
                        round.platforms.retain(|p| p.is_floor());
                    }
                }
                FrameOutcome::Ended { score } => return score,
                FrameOutcome::Idle => panic!("round stopped without ending"),
            }
        }
    }

    #[test]
    fn test_load_success_and_failure() {
        let app = ready_app();
        assert_eq!(app.phase(), Phase::Ready);

        let mut app = App::new();
        app.assets_loaded(Err(AssetError::Timeout {
            path: "./assets/player.png".into(),
            timeout_ms: ASSET_TIMEOUT_MS,
        }));
        assert_eq!(app.phase(), Phase::Error);
        assert!(app.last_error().unwrap().contains("timeout"));
        assert!(!app.start(1, 0.0));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut app = ready_app();
        assert!(app.start(1, 0.0));
        assert_eq!(app.phase(), Phase::Playing);
        let id = app.round_id();
        assert!(!app.start(2, 10.0));
        assert_eq!(app.round_id(), id);
        assert_eq!(app.round().unwrap().seed, 1);
    }

    #[test]
    fn test_game_over_only_from_playing() {
        let mut app = ready_app();
        assert!(!app.game_over());
        app.start(1, 0.0);
        assert!(app.game_over());
        assert!(!app.game_over());
        assert_eq!(app.phase(), Phase::GameOver(GameOverStage::AwaitingName));
    }

    #[test]
    fn test_frame_idle_outside_playing() {
        let mut app = ready_app();
        assert_eq!(app.frame(16.0, &TickInput::default()), FrameOutcome::Idle);
    }

    #[test]
    fn test_round_plays_to_game_over() {
        let mut app = ready_app();
        let score = played_out(&mut app);
        assert!(score >= SCORE_JUMP);
        assert_eq!(app.phase(), Phase::GameOver(GameOverStage::AwaitingName));
        assert!(app.drain_events().contains(&GameEvent::GameOver));
        // Frames after the end don't reschedule
        assert_eq!(app.frame(1e6, &TickInput::default()), FrameOutcome::Idle);
    }

    #[test]
    fn test_declined_name_returns_to_ready() {
        let mut app = ready_app();
        played_out(&mut app);
        assert_eq!(app.name_entered(None), None);
        assert_eq!(app.phase(), Phase::Ready);

        played_out(&mut app);
        assert_eq!(app.name_entered(Some("   ")), None);
        assert_eq!(app.phase(), Phase::Ready);
    }

    #[test]
    fn test_submission_flow() {
        let mut app = ready_app();
        let score = played_out(&mut app);
        let pending = app.name_entered(Some(" Ann ")).unwrap();
        assert_eq!(pending.submission.player_name, "Ann");
        assert_eq!(pending.submission.score, score);
        assert_eq!(app.phase(), Phase::GameOver(GameOverStage::Submitting));

        // No second submission while one is outstanding
        assert_eq!(app.name_entered(Some("Ann")), None);

        // Local score survives a failed submission
        let failed = Err(ScoreError::Network("offline".into()));
        assert!(app.submission_finished(pending.round_id, &failed));
        assert_eq!(app.phase(), Phase::Ready);
        assert_eq!(app.score(), score);
    }

    #[test]
    fn test_stale_submission_ignored() {
        let mut app = ready_app();
        played_out(&mut app);
        let pending = app.name_entered(Some("Ann")).unwrap();
        assert!(!app.submission_finished(pending.round_id + 1, &Ok(())));
        assert_eq!(app.phase(), Phase::GameOver(GameOverStage::Submitting));
        assert!(app.submission_finished(pending.round_id, &Ok(())));
        assert!(!app.submission_finished(pending.round_id, &Ok(())));
    }

    #[test]
    fn test_restart_resets_score() {
        let mut app = ready_app();
        played_out(&mut app);
        app.name_entered(None);
        assert!(app.start(7, 0.0));
        assert_eq!(app.score(), 0);
        assert_eq!(app.round_id(), 2);
    }

    #[test]
    fn test_assets_loaded_ignored_after_loading() {
        let mut app = ready_app();
        assert!(!app.assets_loaded(Err(AssetError::Loader("late".into()))));
        assert_eq!(app.phase(), Phase::Ready);
    }
}
