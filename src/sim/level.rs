//! Procedural level population
//!
//! Object counts scale linearly with the level index; only positions (and
//! oscillation parameters) are random. Given the same index and RNG seed a
//! level is generated identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::object::{ObjectKind, Oscillation, WorldObject};
use crate::tuning::Tuning;

/// How a level was entered; decides its scroll speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEntry {
    /// Fresh session ("start" or "restart")
    Start,
    /// Reached from the previous level's completion screen
    Advance,
}

/// A generated level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level index
    pub index: u32,
    /// World-space extent before the finish marker
    pub length: f32,
    /// World units scrolled per frame at cruise
    pub scroll_speed: f32,
    /// Obstacles, then fuel, then bonus, then the finish marker
    pub objects: Vec<WorldObject>,
}

impl Level {
    pub fn obstacle_count(&self) -> usize {
        self.objects.iter().filter(|o| o.kind.is_obstacle()).count()
    }

    pub fn count_of(&self, kind: ObjectKind) -> usize {
        self.objects
            .iter()
            .filter(|o| std::mem::discriminant(&o.kind) == std::mem::discriminant(&kind))
            .count()
    }

    pub fn finish(&self) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.kind == ObjectKind::Finish)
    }

    /// Recompute every object's screen position for this frame
    pub fn update_objects(&mut self, scroll_offset: f32, now_ms: u64) {
        for obj in &mut self.objects {
            obj.update(scroll_offset, now_ms);
        }
    }
}

/// Number of obstacles on a level
pub fn obstacle_count_for_level(level: u32) -> usize {
    (20 + 5 * level) as usize
}

/// Number of fuel canisters on a level
pub fn fuel_count_for_level(level: u32) -> usize {
    (10 + level) as usize
}

/// Number of bonus pickups on a level
pub fn bonus_count_for_level(level: u32) -> usize {
    (15 + 2 * level) as usize
}

/// Scroll speed for a level
///
/// A fresh session always runs at the initial speed. Advancing applies the
/// per-level step to the new index, so level 2 scrolls at `initial + 1.0`.
pub fn scroll_speed_for_level(entry: LevelEntry, level: u32, tuning: &Tuning) -> f32 {
    match entry {
        LevelEntry::Start => tuning.initial_scroll_speed,
        LevelEntry::Advance => {
            tuning.initial_scroll_speed + tuning.scroll_speed_per_level * level as f32
        }
    }
}

/// RNG for one level of a seeded session
pub fn level_rng(session_seed: u64, level: u32) -> Pcg32 {
    let level_seed = (level as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(session_seed);
    Pcg32::seed_from_u64(level_seed)
}

/// Populate a level
///
/// `now_ms` stamps moving obstacles so their oscillation phase starts at zero.
pub fn generate_level<R: Rng>(
    level: u32,
    entry: LevelEntry,
    rng: &mut R,
    tuning: &Tuning,
    now_ms: u64,
) -> Level {
    let length = tuning.level_length;
    let obstacle_count = obstacle_count_for_level(level);
    let fuel_count = fuel_count_for_level(level);
    let bonus_count = bonus_count_for_level(level);

    let mut objects = Vec::with_capacity(obstacle_count + fuel_count + bonus_count + 1);
    let mut next_id = 1u32;
    let mut place = |rng: &mut R, kind: ObjectKind, size: f32| {
        let x = rng.random_range(tuning.safe_start..length);
        let y = rng.random_range(0.0..tuning.screen_height - size);
        let obj = WorldObject::new(next_id, kind, Vec2::new(x, y), Vec2::splat(size));
        next_id += 1;
        obj
    };

    let moving = level >= tuning.moving_obstacle_level;
    for _ in 0..obstacle_count {
        // Position is drawn before the motion parameters
        let mut obstacle = place(
            &mut *rng,
            ObjectKind::Obstacle { motion: None },
            tuning.obstacle_size,
        );
        if moving {
            let angular_speed = rng.random_range(1.0..3.0);
            let amplitude = rng.random_range(10..=30i32) as f32;
            obstacle.kind = ObjectKind::Obstacle {
                motion: Some(Oscillation {
                    amplitude,
                    angular_speed,
                    spawn_ms: now_ms,
                }),
            };
        }
        objects.push(obstacle);
    }
    for _ in 0..fuel_count {
        objects.push(place(&mut *rng, ObjectKind::Fuel, tuning.fuel_size));
    }
    for _ in 0..bonus_count {
        objects.push(place(&mut *rng, ObjectKind::Bonus, tuning.bonus_size));
    }

    objects.push(WorldObject::new(
        next_id,
        ObjectKind::Finish,
        Vec2::new(length + tuning.finish_offset, 0.0),
        Vec2::new(tuning.finish_width, tuning.screen_height),
    ));

    let scroll_speed = scroll_speed_for_level(entry, level, tuning);
    log::info!(
        "Level {} generated: {} obstacles ({}), {} fuel, {} bonus, scroll speed {}",
        level,
        obstacle_count,
        if moving { "moving" } else { "static" },
        fuel_count,
        bonus_count,
        scroll_speed
    );

    Level {
        index: level,
        length,
        scroll_speed,
        objects,
    }
}
