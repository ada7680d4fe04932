//! Property tests for per-frame invariants

use proptest::prelude::*;

use sky_navigator::consts::*;
use sky_navigator::sim::{Command, FlightControls, GamePhase, GameState, TickInput, tick};

fn controls() -> impl Strategy<Value = FlightControls> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right)| FlightControls {
            up,
            down,
            left,
            right,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_frame_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(controls(), 1..600),
        dt in 0.0f32..0.2,
    ) {
        let mut state = GameState::new(seed);
        tick(&mut state, &TickInput::command(Command::Start), dt, 0);

        let mut last_scroll = state.scroll_offset;
        for (frame, held) in inputs.iter().enumerate() {
            let now_ms = (frame as u64 + 1) * 16;
            tick(&mut state, &TickInput::held(*held), dt, now_ms);

            prop_assert!(state.battery >= 0.0 && state.battery <= MAX_BATTERY);
            prop_assert!(state.craft.vel.x >= CRAFT_MIN_VX && state.craft.vel.x <= CRAFT_MAX_VX);
            prop_assert!(state.craft.pos.y >= 0.0);
            prop_assert!(state.scroll_offset >= last_scroll);
            last_scroll = state.scroll_offset;

            if state.craft.is_crashed(SCREEN_HEIGHT) {
                prop_assert_eq!(state.phase, GamePhase::GameOver);
            }
            if state.phase != GamePhase::Active {
                break;
            }
        }
    }

    #[test]
    fn test_autopilot_keeps_invariants(seed in any::<u64>()) {
        let mut state = GameState::new(seed);
        let input = TickInput { autopilot: true, ..Default::default() };
        tick(&mut state, &TickInput::command(Command::Start), FRAME_DT, 0);
        for frame in 1..=600u64 {
            tick(&mut state, &input, FRAME_DT, frame * 16);
            prop_assert!(state.battery >= 0.0 && state.battery <= MAX_BATTERY);
            prop_assert!(state.craft.pos.y >= 0.0);
            if state.phase != GamePhase::Active {
                break;
            }
        }
    }
}
