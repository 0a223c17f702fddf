//! Property tests for the roll sequencer and widget.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use tumble_core::{DiceWidget, Face, RecordingHaptics, RollAttempt, RollConfig, RollEventKind};

fn widget(seed: u64) -> DiceWidget<StdRng, RecordingHaptics> {
    DiceWidget::new(
        RollConfig::default(),
        StdRng::seed_from_u64(seed),
        RecordingHaptics::new(),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn face_is_always_a_die_face(seed in any::<u64>(), rolls in 1usize..6) {
        let mut widget = widget(seed);
        for _ in 0..rolls {
            prop_assert!(widget.tap().is_started());
            widget.run_until_idle(1000.0 / 60.0, 10_000.0);
            prop_assert!((1..=6).contains(&widget.face().value()));
        }
    }

    #[test]
    fn taps_during_a_roll_never_start_another(
        seed in any::<u64>(),
        frame_ms in 4.0f64..40.0,
        taps in proptest::collection::vec(1usize..40, 1..8),
    ) {
        let mut widget = widget(seed);
        prop_assert!(widget.tap().is_started());
        for frames in taps {
            for _ in 0..frames {
                widget.advance(frame_ms);
            }
            if widget.is_rolling() {
                prop_assert_eq!(widget.tap(), RollAttempt::Rejected);
            }
        }
        widget.run_until_idle(frame_ms, 10_000.0);

        let started = widget.roller().rolls_started();
        prop_assert_eq!(widget.roller().haptics().count() as u64, started);
        let face_changes = widget
            .log()
            .events()
            .iter()
            .filter(|e| matches!(e.kind, RollEventKind::FaceChanged { .. }))
            .count() as u64;
        prop_assert_eq!(face_changes, started);
        prop_assert!(!widget.is_rolling());
    }

    #[test]
    fn any_seed_covers_only_valid_faces(n in any::<u32>()) {
        let face = Face::from_roll(n);
        prop_assert!(Face::ALL.contains(&face));
    }
}

#[test]
fn timeline_of_one_roll() {
    let mut widget = widget(11);
    widget.tap();
    widget.run_until_idle(1000.0 / 60.0, 10_000.0);
    let kinds: Vec<&str> = widget.log().events().iter().map(|e| e.kind.name()).collect();
    insta::assert_snapshot!(kinds.join(" "), @"started haptic face finished");
}
