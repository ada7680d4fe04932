//! Demo autopilot
//!
//! Flies the craft for attract mode and headless runs. It is a simple
//! reactive pilot: dodge the nearest obstacle ahead, go for fuel when the
//! battery is low, otherwise chase bonus pickups and cruise at mid height.

use super::craft::FlightControls;
use super::object::{ObjectKind, WorldObject};
use super::state::GameState;

/// How far ahead (screen units past the craft's nose) threats are considered
const LOOKAHEAD: f32 = 260.0;
/// How far ahead pickups are considered
const PICKUP_RANGE: f32 = 500.0;
/// Vertical clearance kept around obstacles
const CLEARANCE: f32 = 12.0;
/// Frames of velocity used to predict altitude
const PREDICT_FRAMES: f32 = 8.0;
/// Distance kept from the floor
const FLOOR_MARGIN: f32 = 24.0;
/// Fastest descent the pilot allows, per frame
const MAX_SINK: f32 = 3.0;
/// Battery fraction below which fuel becomes the priority
const LOW_BATTERY: f32 = 0.5;

/// Choose the held keys for this frame
pub fn steer(state: &GameState, now_ms: u64) -> FlightControls {
    let craft = &state.craft;
    let screen_height = state.tuning.screen_height;
    let nose = craft.pos.x + craft.size.x;
    let top = craft.pos.y;
    let bottom = craft.pos.y + craft.size.y;

    let ahead = |obj: &&WorldObject, range: f32| {
        obj.active
            && obj.screen_pos.x + obj.size.x >= craft.pos.x
            && obj.screen_pos.x - nose <= range
    };

    // Nearest obstacle ahead whose vertical span threatens the craft's
    let threat = state
        .objects()
        .iter()
        .filter(|o| o.kind.is_obstacle() && ahead(o, LOOKAHEAD))
        .filter(|o| {
            o.screen_pos.y < bottom + CLEARANCE && o.screen_pos.y + o.size.y > top - CLEARANCE
        })
        .min_by(|a, b| a.screen_pos.x.total_cmp(&b.screen_pos.x));

    let mut target_y = screen_height / 2.0 - craft.size.y / 2.0;

    if let Some(obstacle) = threat {
        let above = obstacle.screen_pos.y - craft.size.y - CLEARANCE;
        let below = obstacle.screen_pos.y + obstacle.size.y + CLEARANCE;
        let room_below = screen_height - FLOOR_MARGIN - craft.size.y - below;
        // Prefer the side closer to the craft, unless it lacks room
        target_y = if above >= 0.0 && (top - above <= below - top || room_below < 0.0) {
            above
        } else {
            below
        };
    } else {
        let wanted = if state.battery_fraction() < LOW_BATTERY {
            ObjectKind::Fuel
        } else {
            ObjectKind::Bonus
        };
        let pickup = state
            .objects()
            .iter()
            .filter(|o| o.kind == wanted && ahead(o, PICKUP_RANGE))
            .min_by(|a, b| a.screen_pos.x.total_cmp(&b.screen_pos.x));
        if let Some(pickup) = pickup {
            target_y = pickup.screen_pos.y + pickup.size.y / 2.0 - craft.size.y / 2.0;
        }
    }

    let floor_limit = screen_height - FLOOR_MARGIN - craft.size.y;
    let target_y = target_y.clamp(0.0, floor_limit);
    let predicted = craft.pos.y + craft.vel.y * PREDICT_FRAMES;

    let near_floor = predicted > floor_limit;
    let sinking_fast = craft.vel.y > MAX_SINK;
    let up = near_floor || sinking_fast || predicted > target_y;
    let down = !up && craft.vel.y < MAX_SINK / 2.0 && predicted < target_y - 40.0;

    // Ease off near an obstacle, except while a hit cannot land anyway
    let cooling = state.in_cooldown(now_ms);
    let close_threat = threat.is_some_and(|o| o.screen_pos.x - nose < LOOKAHEAD / 2.0);
    let left = close_threat && !cooling;
    let right = threat.is_none();

    FlightControls {
        up,
        down,
        left,
        right,
    }
}
