//! Flight physics for the player's craft
//!
//! The craft never moves horizontally on screen. Its horizontal velocity only
//! changes how fast the world scrolls past it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Horizontal speed below which decay snaps straight to zero
const VX_SNAP: f32 = 0.1;

/// Held directional keys for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightControls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    /// Top-left corner in screen space
    pub pos: Vec2,
    /// Per-frame velocity; `vel.x` feeds the scroll rate
    pub vel: Vec2,
    pub size: Vec2,
    pub min_vx: f32,
    pub max_vx: f32,
    /// Right was held last frame (drives the exhaust effect)
    #[serde(default)]
    pub thrusting: bool,
}

impl Craft {
    /// Spawn a craft at its level start position, at rest
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.craft_start_x, tuning.craft_start_y()),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.craft_width, tuning.craft_height),
            min_vx: tuning.min_vx,
            max_vx: tuning.max_vx,
            thrusting: false,
        }
    }

    /// Collider in screen space
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Bottom edge has reached the floor of the screen
    pub fn is_crashed(&self, screen_height: f32) -> bool {
        self.pos.y + self.size.y >= screen_height
    }

    /// Advance velocity, then position, by one frame
    pub fn update(&mut self, controls: &FlightControls, tuning: &Tuning) {
        self.vel.y += tuning.gravity;

        if controls.up {
            self.vel.y -= tuning.flight_power;
        }
        if controls.down {
            self.vel.y += tuning.flight_power / 2.0;
        }

        if controls.right {
            self.vel.x = (self.vel.x + tuning.horizontal_accel).min(self.max_vx);
        } else if controls.left {
            self.vel.x = (self.vel.x - tuning.horizontal_accel).max(self.min_vx);
        } else {
            self.decay_horizontal(tuning.horizontal_decay);
        }
        self.thrusting = controls.right;

        self.pos.y += self.vel.y;

        // Top of the screen is a ceiling, not a crash
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = 0.0;
        }
    }

    /// Ease horizontal speed back toward cruise, snapping once it is slow
    fn decay_horizontal(&mut self, decay: f32) {
        if self.vel.x > 0.0 {
            self.vel.x -= decay;
        } else if self.vel.x < 0.0 {
            self.vel.x += decay;
        }
        if self.vel.x.abs() < VX_SNAP {
            self.vel.x = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn held(up: bool, down: bool, left: bool, right: bool) -> FlightControls {
        FlightControls {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_spawn_position() {
        let craft = Craft::new(&Tuning::default());
        assert_eq!(craft.pos, Vec2::new(CRAFT_START_X, SCREEN_HEIGHT / 2.0));
        assert_eq!(craft.vel, Vec2::ZERO);
        assert_eq!(craft.size, Vec2::new(CRAFT_WIDTH, CRAFT_HEIGHT));
    }

    #[test]
    fn test_gravity_only() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        let start_y = craft.pos.y;
        craft.update(&FlightControls::default(), &tuning);
        assert!((craft.vel.y - GRAVITY).abs() < 1e-6);
        assert!((craft.pos.y - (start_y + GRAVITY)).abs() < 1e-4);
        assert_eq!(craft.pos.x, CRAFT_START_X);
    }

    #[test]
    fn test_up_thrust_at_ceiling() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.pos.y = 0.0;
        craft.update(&held(true, false, false, false), &tuning);
        // vy = GRAVITY - FLIGHT_POWER < 0, so y goes negative and is clamped
        assert_eq!(craft.pos.y, 0.0);
        assert_eq!(craft.vel.y, 0.0);
    }

    #[test]
    fn test_up_thrust_velocity() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.update(&held(true, false, false, false), &tuning);
        assert!((craft.vel.y - (GRAVITY - FLIGHT_POWER)).abs() < 1e-6);
    }

    #[test]
    fn test_up_and_down_both_apply() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.update(&held(true, true, false, false), &tuning);
        let expected = GRAVITY - FLIGHT_POWER + FLIGHT_POWER / 2.0;
        assert!((craft.vel.y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_right_clamps_to_max() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        for _ in 0..200 {
            craft.update(&held(false, false, false, true), &tuning);
            craft.pos.y = 100.0;
        }
        assert_eq!(craft.vel.x, CRAFT_MAX_VX);
        assert!(craft.thrusting);
    }

    #[test]
    fn test_right_wins_over_left() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.update(&held(false, false, true, true), &tuning);
        assert!((craft.vel.x - HORIZONTAL_ACCEL).abs() < 1e-6);
    }

    #[test]
    fn test_left_clamps_to_min() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        for _ in 0..200 {
            craft.update(&held(false, false, true, false), &tuning);
            craft.pos.y = 100.0;
        }
        assert_eq!(craft.vel.x, CRAFT_MIN_VX);
        assert!(!craft.thrusting);
    }

    #[test]
    fn test_horizontal_decay_snaps_to_zero() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.vel.x = 1.0;
        let mut frames = 0;
        while craft.vel.x != 0.0 {
            craft.update(&FlightControls::default(), &tuning);
            craft.pos.y = 100.0;
            frames += 1;
            assert!(frames < 100, "decay never reached zero");
        }
        // 1.0 -> 0.1 in 18 steps of 0.05, then one more step falls below the snap threshold
        assert!(frames <= 20);

        craft.vel.x = -0.08;
        craft.update(&FlightControls::default(), &tuning);
        assert_eq!(craft.vel.x, 0.0);
    }

    #[test]
    fn test_crash_detection() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.pos.y = SCREEN_HEIGHT - CRAFT_HEIGHT - 1.0;
        assert!(!craft.is_crashed(SCREEN_HEIGHT));
        craft.pos.y = SCREEN_HEIGHT - CRAFT_HEIGHT;
        assert!(craft.is_crashed(SCREEN_HEIGHT));
    }
}
