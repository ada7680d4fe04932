//! Per-frame simulation step
//!
//! Core game loop that advances the session by one rendered frame. The order
//! of the steps inside an active frame is fixed:
//! physics → crash check → scroll → object motion → collisions → battery/score
//! → phase transitions.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision::resolve_collisions;
use super::craft::FlightControls;
use super::object::ObjectKind;
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete, edge-triggered commands from the outer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Advance,
    Restart,
    /// Single-key action: start, advance or restart depending on phase
    Primary,
    Quit,
}

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held directional keys
    pub controls: FlightControls,
    /// Key-press command, if any this frame
    pub command: Option<Command>,
    /// Demo mode - the autopilot flies instead of `controls`
    pub autopilot: bool,
}

impl TickInput {
    pub fn held(controls: FlightControls) -> Self {
        Self {
            controls,
            ..Default::default()
        }
    }

    pub fn command(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Default::default()
        }
    }
}

/// Advance the game by one frame
///
/// `dt` is the real time since the previous frame in seconds and drives
/// battery drain and time score. Flight physics and scrolling are per-frame.
/// `now_ms` is a monotonic timestamp used for cooldowns and oscillation.
///
/// A command that changes phase consumes the frame; simulation resumes on the
/// next call.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now_ms: u64) {
    state.events.clear();

    if let Some(command) = input.command
        && apply_command(state, command, now_ms)
    {
        return;
    }

    if state.phase != GamePhase::Active {
        return;
    }

    let controls = if input.autopilot {
        autopilot::steer(state, now_ms)
    } else {
        input.controls
    };
    step_active(state, &controls, dt.max(0.0), now_ms);
}

/// Returns true if the command caused a phase transition
fn apply_command(state: &mut GameState, command: Command, now_ms: u64) -> bool {
    match command {
        Command::Start => state.start(now_ms),
        Command::Advance => state.advance(now_ms),
        Command::Restart => state.restart(now_ms),
        Command::Primary => match state.phase {
            GamePhase::Idle => state.start(now_ms),
            GamePhase::LevelComplete => state.advance(now_ms),
            GamePhase::GameOver | GamePhase::Win => state.restart(now_ms),
            GamePhase::Active => false,
        },
        Command::Quit => {
            log::info!("Quit requested in phase {}", state.phase.as_str());
            state.quit_requested = true;
            false
        }
    }
}

fn step_active(state: &mut GameState, controls: &FlightControls, dt: f32, now_ms: u64) {
    let Some(level) = state.level.as_mut() else {
        log::warn!("Active phase without a level");
        return;
    };
    let tuning = &state.tuning;
    state.frame_count += 1;

    state.craft.update(controls, tuning);

    if state.craft.is_crashed(tuning.screen_height) {
        state.colliding = false;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Crashed);
        log::info!(
            "Crashed on level {} with score {}",
            state.level_index,
            state.score
        );
        return;
    }

    // The world never scrolls backwards
    state.scroll_offset += (level.scroll_speed + state.craft.vel.x).max(0.0);
    level.update_objects(state.scroll_offset, now_ms);

    let outcome = resolve_collisions(
        &state.craft.rect(),
        &mut level.objects,
        now_ms,
        &mut state.cooldown,
        &mut state.battery,
        tuning,
    );
    state.colliding = outcome.colliding;
    state.score = state.score.saturating_add(outcome.score_gained);
    for contact in &outcome.contacts {
        state.events.push(match contact.kind {
            ObjectKind::Obstacle { .. } => GameEvent::ObstacleHit { id: contact.id },
            ObjectKind::Fuel => GameEvent::FuelCollected { id: contact.id },
            ObjectKind::Bonus => GameEvent::BonusCollected { id: contact.id },
            ObjectKind::Finish => continue,
        });
    }

    state.score = state
        .score
        .saturating_add((tuning.score_per_second * dt).floor() as u64);
    state.battery = (state.battery - tuning.battery_drain_rate * dt).max(0.0);

    // Depletion wins over a finish reached on the same frame
    if state.battery <= 0.0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::BatteryDepleted);
        log::info!(
            "Battery depleted on level {} with score {}",
            state.level_index,
            state.score
        );
    } else if outcome.finish_reached {
        if state.is_final_level() {
            state.phase = GamePhase::Win;
            state.events.push(GameEvent::Win);
            log::info!("All levels cleared with score {}", state.score);
        } else {
            state.phase = GamePhase::LevelComplete;
            state.events.push(GameEvent::LevelComplete {
                level: state.level_index,
            });
            log::info!(
                "Level {} complete with score {}",
                state.level_index,
                state.score
            );
        }
    }
}
