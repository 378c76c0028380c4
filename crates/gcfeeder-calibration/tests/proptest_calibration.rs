//! Property-based tests for calibration capture.

use gcfeeder_calibration::{
    CalibrationError, CalibrationPoint, EdgeDetector, NOTCHES, Stick, StickCalibrationSession,
    StickStep, TriggerCalibration, TriggerCalibrationSession,
};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = CalibrationPoint> {
    (any::<u8>(), any::<u8>()).prop_map(|(x, y)| CalibrationPoint::new(x, y))
}

fn press(session: &mut StickCalibrationSession, p: CalibrationPoint) {
    session.tick(p, true);
    session.tick(p, false);
}

#[test]
fn trigger_apply_rejected_iff_min_not_below_max() {
    for min in 0..=u8::MAX {
        for max in 0..=u8::MAX {
            let result = TriggerCalibration::new(min, max).validate("l_trigger");
            if min < max {
                assert!(result.is_ok(), "({min}, {max}) should be accepted");
            } else {
                assert_eq!(
                    result,
                    Err(CalibrationError::invalid_trigger("l_trigger", min, max))
                );
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn completed_stick_session_has_eight_notches_and_one_center(
        main in proptest::collection::vec(point(), 9),
        c in proptest::collection::vec(point(), 9),
    ) {
        let mut session = StickCalibrationSession::new();
        for p in main.iter().chain(c.iter()) {
            press(&mut session, *p);
        }
        prop_assert!(session.is_finished());

        let result = session.result();
        prop_assert!(result.is_ok());
        if let Ok(result) = result {
            prop_assert_eq!(Some(&result.main_stick.stick_center), main.first());
            prop_assert_eq!(Some(&result.c_stick.stick_center), c.first());
            prop_assert_eq!(&result.main_stick.notch_points[..], &main[1..]);
            prop_assert_eq!(&result.c_stick.notch_points[..], &c[1..]);
            prop_assert_eq!(result.c_stick.notch_points.len(), NOTCHES);
        }
    }

    #[test]
    fn sustained_confirm_advances_exactly_once(ticks in 1usize..200, p in point()) {
        let mut session = StickCalibrationSession::new();
        let recorded = (0..ticks).filter(|_| session.tick(p, true)).count();
        prop_assert_eq!(recorded, 1);
        prop_assert_eq!(session.step(), StickStep::AwaitingNotch(Stick::Main, 0));

        let mut triggers = TriggerCalibrationSession::new();
        let recorded = (0..ticks).filter(|_| triggers.tick(p.x, true)).count();
        prop_assert_eq!(recorded, 1);
    }

    #[test]
    fn edge_count_matches_rising_transitions(levels in proptest::collection::vec(any::<bool>(), 0..64)) {
        let mut detector = EdgeDetector::new();
        let edges = levels.iter().filter(|l| detector.rising(**l)).count();
        let expected = levels
            .iter()
            .scan(false, |prev, level| {
                let edge = *level && !*prev;
                *prev = *level;
                Some(edge)
            })
            .filter(|e| *e)
            .count();
        prop_assert_eq!(edges, expected);
    }

    #[test]
    fn trigger_session_rejects_iff_min_not_below_max(
        l_min in any::<u8>(), l_max in any::<u8>(),
        r_min in any::<u8>(), r_max in any::<u8>(),
    ) {
        let mut session = TriggerCalibrationSession::new();
        for value in [l_min, l_max, r_min, r_max] {
            session.tick(value, true);
            session.tick(value, false);
        }
        let valid = l_min < l_max && r_min < r_max;
        prop_assert_eq!(session.result().is_ok(), valid);
    }
}
