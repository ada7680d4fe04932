//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from explicit `dt` / `now_ms` arguments
//! - Seeded RNG only
//! - Stable iteration order (objects keep generation order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod craft;
pub mod level;
pub mod object;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionCooldown, CollisionOutcome, Contact, resolve_collisions};
pub use craft::{Craft, FlightControls};
pub use level::{
    Level, LevelEntry, bonus_count_for_level, fuel_count_for_level, generate_level, level_rng,
    obstacle_count_for_level, scroll_speed_for_level,
};
pub use object::{ObjectKind, Oscillation, WorldObject};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Command, TickInput, tick};
