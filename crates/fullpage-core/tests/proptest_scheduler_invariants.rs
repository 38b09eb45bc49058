//! Property-based invariant tests for the section engine.
//!
//! 1. The current section never leaves `1..=total_sections`
//! 2. Committed transitions are at least one cooldown apart
//! 3. Self-targeted jumps never change state or the cooldown timer
//! 4. Mobile mode never lets input move the current section
//! 5. The topmost visible section always matches the current section

use std::sync::Arc;
use std::time::Duration;

use fullpage_core::clock::ManualClock;
use fullpage_core::config::TimingConfig;
use fullpage_core::document::MemoryDocument;
use fullpage_core::input::{FocusTarget, Key, RawInput};
use fullpage_core::location::{Location, MemoryLocation};
use fullpage_core::placement::Layout;
use fullpage_core::scheduler::{IgnoreReason, Outcome, TransitionScheduler};
use fullpage_core::EngineBuilder;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Advance,
    Retreat,
    GoTo(usize),
    Wait(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Advance),
        Just(Op::Retreat),
        (0usize..9).prop_map(Op::GoTo),
        (0u64..2000).prop_map(Op::Wait),
    ]
}

fn raw_input_strategy() -> impl Strategy<Value = RawInput> {
    prop_oneof![
        (-500.0f64..500.0).prop_map(|delta_y| RawInput::Wheel { delta_y }),
        (0.0f64..800.0, 0.0f64..800.0).prop_map(|(x, y)| RawInput::TouchStart { x, y }),
        (0.0f64..800.0, 0.0f64..800.0).prop_map(|(x, y)| RawInput::TouchMove { x, y }),
        Just(RawInput::TouchEnd),
        prop_oneof![
            Just(Key::ArrowUp),
            Just(Key::ArrowDown),
            Just(Key::PageUp),
            Just(Key::PageDown),
            Just(Key::Space),
            Just(Key::Home),
            Just(Key::End),
        ]
        .prop_map(|key| RawInput::Key {
            key,
            focus: FocusTarget::Document
        }),
    ]
}

fn timing_strategy() -> impl Strategy<Value = TimingConfig> {
    (1u64..2000, 0u64..1000).prop_map(|(animation, quiet)| TimingConfig {
        animation_duration_ms: animation,
        quiet_period_ms: quiet,
        ..Default::default()
    })
}

// ═══════════════════════════════════════════════════════════════════════
// 1 + 2. Bounds and cooldown over arbitrary sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn current_section_stays_in_bounds_and_commits_respect_cooldown(
        timing in timing_strategy(),
        total in 1usize..8,
        ops in proptest::collection::vec(op_strategy(), 0..200),
    ) {
        let mut scheduler = TransitionScheduler::new(total, 1, &timing).unwrap();
        let start = std::time::Instant::now();
        let mut elapsed = 0u64;
        let mut commits = Vec::new();

        for op in &ops {
            let now = start + Duration::from_millis(elapsed);
            scheduler.tick(now);
            let outcome = match op {
                Op::Advance => Some(scheduler.advance(now)),
                Op::Retreat => Some(scheduler.retreat(now)),
                Op::GoTo(target) => Some(scheduler.go_to_section(*target, now)),
                Op::Wait(ms) => {
                    elapsed += ms;
                    None
                }
            };
            if let Some(Outcome::Committed(commit)) = outcome {
                commits.push(commit.at);
            }
            let current = scheduler.current_section();
            prop_assert!((1..=total).contains(&current), "section {} out of 1..={}", current, total);
        }

        for pair in commits.windows(2) {
            prop_assert!(
                pair[1] - pair[0] >= timing.cooldown(),
                "commits {:?} apart, cooldown {:?}",
                pair[1] - pair[0],
                timing.cooldown()
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Self-target is idempotent
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn self_target_never_mutates(
        initial in 1usize..=5,
        wait in 0u64..5000,
    ) {
        let timing = TimingConfig::default();
        let mut scheduler = TransitionScheduler::new(5, initial, &timing).unwrap();
        let now = std::time::Instant::now() + Duration::from_millis(wait);

        let before = (scheduler.current_section(), scheduler.is_animating(), scheduler.last_commit());
        let outcome = scheduler.go_to_section(initial, now);

        prop_assert_eq!(outcome, Outcome::Ignored(IgnoreReason::SameSection));
        prop_assert_eq!(
            before,
            (scheduler.current_section(), scheduler.is_animating(), scheduler.last_commit())
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Mobile bypass through the engine
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mobile_input_never_moves_section(
        width in 0u32..768,
        inputs in proptest::collection::vec(raw_input_strategy(), 0..100),
    ) {
        let clock = ManualClock::new();
        let mut engine = EngineBuilder::new(TimingConfig::default())
            .with_viewport_width(width)
            .with_clock(Arc::new(clock.clone()))
            .mount(MemoryDocument::new(), MemoryLocation::with_fragment(Some("3")).unwrap())
            .unwrap();

        for input in &inputs {
            clock.advance(Duration::from_millis(700));
            let response = engine.handle_input(input);
            prop_assert!(response.outcome.is_none());
            prop_assert!(!response.prevent_default);
        }
        prop_assert_eq!(engine.current_section(), 3);
        prop_assert!(engine.markers().is_empty());
        prop_assert!(!engine.document().is_scroll_locked());
    }

    #[test]
    fn desktop_input_stays_in_bounds(
        inputs in proptest::collection::vec((raw_input_strategy(), 0u64..2000), 0..100),
    ) {
        let clock = ManualClock::new();
        let mut engine = EngineBuilder::new(TimingConfig::default())
            .with_clock(Arc::new(clock.clone()))
            .mount(MemoryDocument::new(), MemoryLocation::with_fragment(None).unwrap())
            .unwrap();

        for (input, wait) in &inputs {
            clock.advance(Duration::from_millis(*wait));
            engine.handle_input(input);
            let current = engine.current_section();
            prop_assert!((1..=5).contains(&current));
            prop_assert_eq!(engine.location().fragment().unwrap_or_else(|| "1".to_string()), current.to_string());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Placement agrees with state
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn top_section_is_current(current in 1usize..=5) {
        let layout = Layout::for_section(current);
        prop_assert_eq!(layout.top_section(), Some(current));
        prop_assert_eq!(layout.placements.len(), 5);
    }
}
