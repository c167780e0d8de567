//! Property tests for the animator state machines and color spans.

use herald_shared::{Coloring, Profile, TextAnimation};
use herald_ui::{colorize, AnimatorState, AnimatorTiming, Direction, TypewriterPhase};
use proptest::prelude::*;

const TIMING: AnimatorTiming = AnimatorTiming { hold_seconds: 5.0, blink_seconds: 0.5 };

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 éü✓]{1,24}"
}

fn coloring_strategy() -> impl Strategy<Value = Coloring> {
    prop_oneof![
        Just(Coloring::None),
        Just(Coloring::Rainbow),
        "#[0-9A-F]{6}".prop_map(|hex| Coloring::SingleColor { hex }),
        (any::<bool>(), -4.0f32..20.0).prop_map(|(animate, spread)| Coloring::Gradient {
            start_hex: "#102030".into(),
            end_hex: "#F0E0D0".into(),
            animate,
            spread,
        }),
        (-4.0f32..20.0).prop_map(|spread| Coloring::Wave { spread }),
        (-4.0f32..20.0).prop_map(|spread| Coloring::StaticRainbow { spread }),
    ]
}

proptest! {
    /// Scroll stays within [1, len] once it has moved, and only turns at
    /// the bounds.
    #[test]
    fn prop_scroll_stays_in_bounds(text in text_strategy(), steps in 1..200usize) {
        let len = text.chars().count();
        let profile = Profile::new(text).with_animation(TextAnimation::Scroll { speed: 0.1 });
        let mut state = AnimatorState::new(&profile);

        let mut previous_direction = state.direction();
        for _ in 0..steps {
            state.advance(0.1, &TIMING);
            let index = state.frame_index();
            prop_assert!((1..=len).contains(&index));
            prop_assert_eq!(state.frame().chars().count(), index);

            if state.direction() != previous_direction {
                let expected = if state.direction() == Direction::Backward { len } else { 1 };
                prop_assert_eq!(index, expected);
            }
            previous_direction = state.direction();
        }
    }

    /// The marquee window is always exactly `width` characters and repeats
    /// after `len + width` advances.
    #[test]
    fn prop_marquee_window_width(text in text_strategy(), width in 1..20i32) {
        let len = text.chars().count();
        let profile = Profile::new(text)
            .with_animation(TextAnimation::Marquee { speed: 0.1, width });
        let mut state = AnimatorState::new(&profile);
        let first = state.frame();

        for _ in 0..(len + width as usize) {
            prop_assert_eq!(state.frame().chars().count(), width as usize);
            state.advance(0.1, &TIMING);
        }
        prop_assert_eq!(state.frame(), first);
    }

    /// The typewriter visits Typing, Holding and Erasing in order.
    #[test]
    fn prop_typewriter_cycle_order(text in text_strategy()) {
        let profile = Profile::new(text).with_animation(TextAnimation::Typewriter { speed: 0.5 });
        let mut state = AnimatorState::new(&profile);

        let mut visited = vec![state.typewriter_phase()];
        for _ in 0..200 {
            state.advance(0.5, &TIMING);
            if visited.last() != Some(&state.typewriter_phase()) {
                visited.push(state.typewriter_phase());
            }
        }
        prop_assert!(visited.len() >= 4);
        for window in visited.windows(2) {
            let expected = match window[0] {
                TypewriterPhase::Typing => TypewriterPhase::Holding,
                TypewriterPhase::Holding => TypewriterPhase::Erasing,
                TypewriterPhase::Erasing => TypewriterPhase::Typing,
            };
            prop_assert_eq!(window[1], expected);
        }
    }

    /// Colorize is deterministic and never drops a character.
    #[test]
    fn prop_colorize_deterministic(
        text in text_strategy(),
        coloring in coloring_strategy(),
        phase in 0.0f32..1.0,
    ) {
        let a = colorize(&text, &coloring, phase);
        let b = colorize(&text, &coloring, phase);
        prop_assert_eq!(&a, &b);

        let spans = a.matches("</color>").count();
        let expected = match coloring {
            Coloring::None => 0,
            Coloring::SingleColor { .. } | Coloring::Rainbow => 1,
            _ => text.chars().count(),
        };
        prop_assert_eq!(spans, expected);
    }

    /// The color phase never leaves [0, 1).
    #[test]
    fn prop_color_phase_in_range(
        speed in -3.0f32..3.0,
        steps in prop::collection::vec(0.0f32..2.0, 1..50),
    ) {
        let profile = Profile::new("x").with_coloring(Coloring::Rainbow).with_color_speed(speed);
        let mut state = AnimatorState::new(&profile);
        for dt in steps {
            state.advance(dt, &TIMING);
            let phase = state.color_phase();
            prop_assert!((0.0..1.0).contains(&phase));
        }
    }
}
