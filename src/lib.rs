//! Sky Navigator - a side-scrolling flight arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight physics, level generation, collisions, game state)
//! - `tuning`: Load-time game balance overrides
//!
//! Rendering, audio and input polling live outside this crate. They read the
//! simulation through the query methods on [`sim::GameState`] and drive it
//! with [`sim::tick`].

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Target frame rate the per-frame physics constants are tuned for
    pub const TARGET_FPS: u32 = 60;
    /// Fixed frame duration when driving the simulation headless
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Craft defaults
    pub const CRAFT_WIDTH: f32 = 60.0;
    pub const CRAFT_HEIGHT: f32 = 30.0;
    pub const CRAFT_START_X: f32 = 150.0;
    pub const CRAFT_MIN_VX: f32 = -2.0;
    pub const CRAFT_MAX_VX: f32 = 5.0;

    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.2;
    /// Upward acceleration per frame while "up" is held (down is half this)
    pub const FLIGHT_POWER: f32 = 0.5;
    /// Horizontal speed change per frame while left/right is held
    pub const HORIZONTAL_ACCEL: f32 = 0.1;
    /// Horizontal speed decay per frame with no horizontal input
    pub const HORIZONTAL_DECAY: f32 = 0.05;

    /// Object sizes (square)
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const FUEL_SIZE: f32 = 30.0;
    pub const BONUS_SIZE: f32 = 25.0;
    pub const FINISH_WIDTH: f32 = 60.0;

    /// Level layout
    pub const LEVEL_LENGTH: f32 = 5000.0;
    /// Leading stretch of every level kept free of objects
    pub const SAFE_START: f32 = 500.0;
    /// Distance past the level end where the finish marker sits
    pub const FINISH_OFFSET: f32 = 200.0;
    pub const LEVEL_COUNT: u32 = 5;
    /// First level whose obstacles oscillate
    pub const MOVING_OBSTACLE_LEVEL: u32 = 3;

    /// World scroll per frame on level 1
    pub const INITIAL_SCROLL_SPEED: f32 = 2.0;
    /// Extra scroll per frame per level index after an advance
    pub const SCROLL_SPEED_PER_LEVEL: f32 = 0.5;

    /// Battery
    pub const MAX_BATTERY: f32 = 100.0;
    /// Units per second
    pub const BATTERY_DRAIN_RATE: f32 = 1.0;
    pub const BATTERY_RECHARGE: f32 = 30.0;
    pub const OBSTACLE_DAMAGE: f32 = 20.0;
    pub const COLLISION_COOLDOWN_MS: u64 = 1000;

    /// Scoring
    pub const SCORE_PER_SECOND: f32 = 10.0;
    pub const SCORE_PER_BONUS: u64 = 100;
}
