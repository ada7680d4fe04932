//! Collision detection and response between the craft and world objects
//!
//! Obstacles are gated by a cooldown window and hit at most once per frame.
//! Pickups and the finish marker ignore the cooldown.

use serde::{Deserialize, Serialize};

use super::object::{ObjectKind, WorldObject};
use super::rect::Rect;
use crate::tuning::Tuning;

/// Obstacle damage cooldown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionCooldown {
    /// Timestamp (ms) of the last obstacle hit this session
    pub last_hit_ms: Option<u64>,
}

impl CollisionCooldown {
    /// Still inside the window opened by the last obstacle hit
    pub fn is_active(&self, now_ms: u64, window_ms: u64) -> bool {
        self.last_hit_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < window_ms)
    }

    pub fn reset(&mut self) {
        self.last_hit_ms = None;
    }
}

/// An object the craft touched and consumed this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub kind: ObjectKind,
}

/// Result of resolving one frame of collisions
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    /// An obstacle hit landed this frame (drives the flash effect)
    pub colliding: bool,
    /// The craft touched the finish marker
    pub finish_reached: bool,
    /// Score earned from bonus pickups
    pub score_gained: u64,
    /// Consumed objects in iteration order
    pub contacts: Vec<Contact>,
}

/// Resolve contacts between the craft and every active object
///
/// Battery changes are applied in iteration order with clamping after each
/// step, so an obstacle followed by fuel in the same frame differs from fuel
/// followed by an obstacle when the battery is near empty.
pub fn resolve_collisions(
    craft: &Rect,
    objects: &mut [WorldObject],
    now_ms: u64,
    cooldown: &mut CollisionCooldown,
    battery: &mut f32,
    tuning: &Tuning,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let obstacles_armed = !cooldown.is_active(now_ms, tuning.collision_cooldown_ms);

    for obj in objects.iter_mut() {
        if !obj.collides_with(craft) {
            continue;
        }

        match obj.kind {
            ObjectKind::Obstacle { .. } => {
                // One obstacle hit per frame, none while cooling down
                if !obstacles_armed || outcome.colliding {
                    continue;
                }
                obj.active = false;
                *battery = (*battery - tuning.obstacle_damage).max(0.0);
                cooldown.last_hit_ms = Some(now_ms);
                outcome.colliding = true;
                log::debug!("Obstacle {} hit, battery {:.1}", obj.id, *battery);
            }
            ObjectKind::Fuel => {
                obj.active = false;
                *battery = (*battery + tuning.battery_recharge).min(tuning.max_battery);
                log::debug!("Fuel {} collected, battery {:.1}", obj.id, *battery);
            }
            ObjectKind::Bonus => {
                obj.active = false;
                outcome.score_gained += tuning.score_per_bonus;
                log::debug!("Bonus {} collected", obj.id);
            }
            ObjectKind::Finish => {
                outcome.finish_reached = true;
                continue;
            }
        }

        outcome.contacts.push(Contact {
            id: obj.id,
            kind: obj.kind,
        });
    }

    outcome
}
