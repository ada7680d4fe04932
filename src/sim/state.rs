//! Game state and core simulation types
//!
//! Everything a renderer or audio layer needs is readable from [`GameState`].
//! Only [`crate::sim::tick`] and the transition methods here mutate it.

use serde::{Deserialize, Serialize};

use super::collision::CollisionCooldown;
use super::craft::Craft;
use super::level::{Level, LevelEntry, generate_level, level_rng};
use super::object::WorldObject;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start, waiting on the title screen
    Idle,
    /// Flying
    Active,
    /// Crashed or ran out of battery; waits for restart
    GameOver,
    /// Finish reached on a non-final level; waits for advance
    LevelComplete,
    /// Finish reached on the final level; waits for restart
    Win,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Active => "active",
            GamePhase::GameOver => "game over",
            GamePhase::LevelComplete => "level complete",
            GamePhase::Win => "win",
        }
    }
}

/// Something that happened during a tick, for audio and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    ObstacleHit { id: u32 },
    FuelCollected { id: u32 },
    BonusCollected { id: u32 },
    /// Craft touched the bottom of the screen
    Crashed,
    BatteryDepleted,
    LevelComplete { level: u32 },
    Win,
}

/// Complete game session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed; every level's layout derives from it
    pub seed: u64,
    /// Balance values, fixed for the session
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// 1-based current level
    pub level_index: u32,
    pub score: u64,
    /// In [0, tuning.max_battery]
    pub battery: f32,
    /// World distance scrolled on the current level
    pub scroll_offset: f32,
    pub craft: Craft,
    /// `None` until the first start
    pub level: Option<Level>,
    pub cooldown: CollisionCooldown,
    /// An obstacle hit landed on the last frame
    pub colliding: bool,
    /// Frames simulated in the Active phase this session
    pub frame_count: u64,
    /// Number of runs started, mixed into level seeds so restarts differ
    pub runs_started: u32,
    /// The outer loop asked to quit
    pub quit_requested: bool,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::idle(seed, Tuning::default())
    }

    /// Create an idle session with custom tuning
    ///
    /// Fails if the tuning cannot produce a playable level.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::idle(seed, tuning))
    }

    /// `tuning` must already be valid
    fn idle(seed: u64, tuning: Tuning) -> Self {
        let craft = Craft::new(&tuning);
        let battery = tuning.max_battery;
        Self {
            seed,
            tuning,
            phase: GamePhase::Idle,
            level_index: 1,
            score: 0,
            battery,
            scroll_offset: 0.0,
            craft,
            level: None,
            cooldown: CollisionCooldown::default(),
            colliding: false,
            frame_count: 0,
            runs_started: 0,
            quit_requested: false,
            events: Vec::new(),
        }
    }

    /// Return to a fresh idle session, keeping seed, tuning and run count
    pub fn reset(&mut self) {
        let runs_started = self.runs_started;
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::idle(self.seed, tuning);
        self.runs_started = runs_started;
    }

    /// Idle → Active: begin at level 1
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::Idle {
            log::warn!("Ignoring start in phase {}", self.phase.as_str());
            return false;
        }
        self.runs_started += 1;
        self.level_index = 1;
        self.score = 0;
        self.cooldown.reset();
        self.enter_level(LevelEntry::Start, now_ms);
        true
    }

    /// LevelComplete → Active: move on to the next level
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::LevelComplete {
            log::warn!("Ignoring advance in phase {}", self.phase.as_str());
            return false;
        }
        self.level_index += 1;
        self.enter_level(LevelEntry::Advance, now_ms);
        true
    }

    /// GameOver/Win → Active: full reset, then start over
    pub fn restart(&mut self, now_ms: u64) -> bool {
        if !matches!(self.phase, GamePhase::GameOver | GamePhase::Win) {
            log::warn!("Ignoring restart in phase {}", self.phase.as_str());
            return false;
        }
        self.reset();
        self.start(now_ms)
    }

    /// Reset craft, battery and scroll, then generate the current level
    fn enter_level(&mut self, entry: LevelEntry, now_ms: u64) {
        self.craft = Craft::new(&self.tuning);
        self.battery = self.tuning.max_battery;
        self.scroll_offset = 0.0;
        self.colliding = false;

        let run_seed = self
            .seed
            .wrapping_add((self.runs_started as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let mut rng = level_rng(run_seed, self.level_index);
        let mut level = generate_level(self.level_index, entry, &mut rng, &self.tuning, now_ms);
        level.update_objects(self.scroll_offset, now_ms);
        self.level = Some(level);

        self.phase = GamePhase::Active;
        self.events.push(GameEvent::LevelStarted {
            level: self.level_index,
        });
        log::info!("Level {} started", self.level_index);
    }

    /// The level being played is the last one
    pub fn is_final_level(&self) -> bool {
        self.level_index >= self.tuning.level_count
    }

    /// Current scroll speed (0 before the first start)
    pub fn scroll_speed(&self) -> f32 {
        self.level.as_ref().map_or(0.0, |l| l.scroll_speed)
    }

    /// All objects on the current level, active or not
    pub fn objects(&self) -> &[WorldObject] {
        match &self.level {
            Some(level) => &level.objects,
            None => &[],
        }
    }

    /// Active objects inside the horizontal draw window
    pub fn visible_objects(&self) -> impl Iterator<Item = &WorldObject> {
        let width = self.tuning.screen_width;
        self.objects()
            .iter()
            .filter(move |o| o.active && o.is_visible(width))
    }

    /// Obstacle damage is currently suppressed
    pub fn in_cooldown(&self, now_ms: u64) -> bool {
        self.cooldown
            .is_active(now_ms, self.tuning.collision_cooldown_ms)
    }

    /// Battery as a fraction of capacity, for HUD bars
    pub fn battery_fraction(&self) -> f32 {
        (self.battery / self.tuning.max_battery).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.battery, MAX_BATTERY);
        assert!(state.objects().is_empty());
        assert_eq!(state.scroll_speed(), 0.0);
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let oversized = Tuning {
            obstacle_size: 700.0,
            ..Default::default()
        };
        let err = GameState::with_tuning(1, oversized).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "obstacle_size",
                ..
            }
        ));

        let no_spawn_window = Tuning {
            safe_start: f32::NAN,
            ..Default::default()
        };
        assert!(GameState::with_tuning(1, no_spawn_window).is_err());

        let mut state = GameState::with_tuning(1, Tuning::default()).unwrap();
        assert!(state.start(0));
    }

    #[test]
    fn test_start_generates_level_one() {
        let mut state = GameState::new(1);
        assert!(state.start(0));
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.scroll_speed(), INITIAL_SCROLL_SPEED);
        assert_eq!(state.objects().len(), 25 + 11 + 17 + 1);
        assert_eq!(state.events, vec![GameEvent::LevelStarted { level: 1 }]);
    }

    #[test]
    fn test_commands_in_wrong_phase_are_ignored() {
        let mut state = GameState::new(1);
        assert!(!state.advance(0));
        assert!(!state.restart(0));
        assert_eq!(state.phase, GamePhase::Idle);

        state.start(0);
        assert!(!state.start(0));
        assert!(!state.advance(0));
        assert!(!state.restart(0));
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_advance_steps_scroll_speed() {
        let mut state = GameState::new(5);
        state.start(0);
        state.score = 1234;
        state.battery = 12.0;
        state.scroll_offset = 4000.0;
        state.phase = GamePhase::LevelComplete;

        assert!(state.advance(10_000));
        assert_eq!(state.level_index, 2);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.scroll_speed(), INITIAL_SCROLL_SPEED + 1.0);
        assert_eq!(state.battery, MAX_BATTERY);
        assert_eq!(state.scroll_offset, 0.0);
        assert_eq!(state.score, 1234, "score carries across levels");
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(5);
        state.start(0);
        state.level_index = 4;
        state.score = 900;
        state.phase = GamePhase::GameOver;

        assert!(state.restart(50_000));
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.scroll_speed(), INITIAL_SCROLL_SPEED);
        assert_eq!(state.runs_started, 2);
    }

    #[test]
    fn test_restarted_runs_get_new_layouts() {
        let mut state = GameState::new(77);
        state.start(0);
        let first: Vec<_> = state.objects().iter().map(|o| o.anchor).collect();
        state.phase = GamePhase::Win;
        state.restart(0);
        let second: Vec<_> = state.objects().iter().map(|o| o.anchor).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = GameState::new(2024);
        let mut b = GameState::new(2024);
        a.start(0);
        b.start(0);
        let pa: Vec<_> = a.objects().iter().map(|o| o.anchor).collect();
        let pb: Vec<_> = b.objects().iter().map(|o| o.anchor).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_visible_objects_respect_window() {
        let mut state = GameState::new(3);
        state.start(0);
        // Nothing spawns in the first 500 units, and the screen is 800 wide
        for obj in state.visible_objects() {
            assert!(obj.screen_pos.x <= SCREEN_WIDTH);
            assert!(obj.screen_pos.x >= -obj.size.x);
        }
        assert!(state.visible_objects().all(|o| o.anchor.x <= SCREEN_WIDTH));
    }
}
