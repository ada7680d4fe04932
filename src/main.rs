//! Sky Navigator headless runner
//!
//! Drives the simulation at a fixed 60 Hz with the demo autopilot and prints
//! a JSON summary per run. Rendering, audio and keyboard input are supplied by
//! a front end; this binary exercises the core without them.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use sky_navigator::Tuning;
use sky_navigator::consts::FRAME_DT;
use sky_navigator::sim::{Command, GameEvent, GamePhase, GameState, TickInput, tick};

#[derive(Debug, Parser)]
#[command(name = "sky-navigator", about = "Run autopilot sessions headless")]
struct Args {
    /// Session seed (each run derives its own levels from it)
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of runs to play
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// Frame limit per run
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_frames: u64,
    /// JSON file overriding balance values
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Pretty-print the summary
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    run: u32,
    outcome: &'static str,
    level_reached: u32,
    score: u64,
    battery: f32,
    frames: u64,
    obstacles_hit: u32,
    fuel_collected: u32,
    bonus_collected: u32,
}

fn play_run(state: &mut GameState, run: u32, max_frames: u64) -> RunSummary {
    let frame_ms = (FRAME_DT * 1000.0).round() as u64;
    let mut now_ms = 0u64;
    let mut frames = 0u64;
    let (mut obstacles_hit, mut fuel_collected, mut bonus_collected) = (0, 0, 0);

    let autopilot = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let primary = TickInput {
        command: Some(Command::Primary),
        autopilot: true,
        ..Default::default()
    };

    // A run cut off by the frame limit is abandoned
    if matches!(state.phase, GamePhase::Active | GamePhase::LevelComplete) {
        state.reset();
    }
    // Leave the previous run's end screen (or the title screen)
    tick(state, &primary, FRAME_DT, now_ms);

    while frames < max_frames {
        now_ms += frame_ms;
        frames += 1;

        let input = if state.phase == GamePhase::LevelComplete {
            &primary
        } else {
            &autopilot
        };
        tick(state, input, FRAME_DT, now_ms);

        for event in &state.events {
            match event {
                GameEvent::ObstacleHit { .. } => obstacles_hit += 1,
                GameEvent::FuelCollected { .. } => fuel_collected += 1,
                GameEvent::BonusCollected { .. } => bonus_collected += 1,
                _ => {}
            }
        }

        if matches!(state.phase, GamePhase::GameOver | GamePhase::Win) {
            break;
        }
    }

    RunSummary {
        run,
        outcome: state.phase.as_str(),
        level_reached: state.level_index,
        score: state.score,
        battery: state.battery,
        frames,
        obstacles_hit,
        fuel_collected,
        bonus_collected,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    log::info!(
        "Sky Navigator headless: seed {}, {} run(s), {} level(s)",
        args.seed,
        args.runs,
        tuning.level_count
    );

    let mut state = GameState::with_tuning(args.seed, tuning)?;
    let mut summaries = Vec::with_capacity(args.runs as usize);
    for run in 1..=args.runs {
        let summary = play_run(&mut state, run, args.max_frames);
        log::info!(
            "Run {} ended: {} on level {} with score {}",
            run,
            summary.outcome,
            summary.level_reached,
            summary.score
        );
        summaries.push(summary);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&summaries)?
    } else {
        serde_json::to_string(&summaries)?
    };
    println!("{json}");
    Ok(())
}
