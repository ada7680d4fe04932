//! World objects scrolling past the craft
//!
//! Objects are anchored in world space. Once per frame their screen position
//! is derived from the scroll offset (and, for moving obstacles, from the time
//! since they spawned). Renderers read the stored screen position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Sinusoidal horizontal drift of a moving obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Peak horizontal offset in world units
    pub amplitude: f32,
    /// Radians per second
    pub angular_speed: f32,
    /// Timestamp (ms) the obstacle was generated at; phase is measured from here
    pub spawn_ms: u64,
}

impl Oscillation {
    /// Horizontal offset at `now_ms`
    pub fn offset_at(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.spawn_ms) as f32 / 1000.0;
        self.amplitude * (elapsed * self.angular_speed).sin()
    }
}

/// Object types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Drains battery on contact; `motion` is set on moving obstacles only
    Obstacle { motion: Option<Oscillation> },
    /// Recharges battery
    Fuel,
    /// Awards bonus score
    Bonus,
    /// Ends the level
    Finish,
}

impl ObjectKind {
    pub fn is_obstacle(&self) -> bool {
        matches!(self, ObjectKind::Obstacle { .. })
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, ObjectKind::Obstacle { motion: Some(_) })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Obstacle { motion: None } => "obstacle",
            ObjectKind::Obstacle { motion: Some(_) } => "moving obstacle",
            ObjectKind::Fuel => "fuel",
            ObjectKind::Bonus => "bonus",
            ObjectKind::Finish => "finish",
        }
    }
}

/// An object placed in a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Top-left corner in world space
    pub anchor: Vec2,
    pub size: Vec2,
    /// Cleared once consumed; inactive objects neither collide nor draw
    pub active: bool,
    /// Top-left corner in screen space, as of the last `update`
    pub screen_pos: Vec2,
}

impl WorldObject {
    pub fn new(id: u32, kind: ObjectKind, anchor: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            anchor,
            size,
            active: true,
            screen_pos: anchor,
        }
    }

    /// Recompute the screen position for this frame
    pub fn update(&mut self, scroll_offset: f32, now_ms: u64) {
        let drift = match self.kind {
            ObjectKind::Obstacle {
                motion: Some(motion),
            } => motion.offset_at(now_ms),
            _ => 0.0,
        };
        self.screen_pos = Vec2::new(self.anchor.x + drift - scroll_offset, self.anchor.y);
    }

    /// Collider in screen space (ignores visibility)
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.screen_pos,
            size: self.size,
        }
    }

    /// Inside the horizontal draw window
    pub fn is_visible(&self, screen_width: f32) -> bool {
        self.screen_pos.x >= -self.size.x && self.screen_pos.x <= screen_width
    }

    /// Active and overlapping `other`
    pub fn collides_with(&self, other: &Rect) -> bool {
        self.active && self.rect().overlaps(other)
    }
}
