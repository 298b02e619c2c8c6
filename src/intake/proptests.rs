//! Property-based tests for the intake state machine

use super::normalize::normalize;
use super::state::*;
use super::transition::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_rooms() -> impl Strategy<Value = Rooms> {
    (1u32..10, 1u32..10).prop_map(|(bedrooms, bathrooms)| Rooms {
        bedrooms,
        bathrooms,
    })
}

fn arb_service() -> impl Strategy<Value = ServiceType> {
    prop_oneof![
        Just(ServiceType::Standard),
        Just(ServiceType::Deep),
        Just(ServiceType::MoveOut),
    ]
}

fn arb_window() -> impl Strategy<Value = TimeWindow> {
    prop_oneof![
        Just(TimeWindow::EarlyMorning),
        Just(TimeWindow::LateMorning),
        Just(TimeWindow::Afternoon),
    ]
}

fn arb_zip() -> impl Strategy<Value = String> {
    "[0-9]{5}"
}

fn arb_stage() -> impl Strategy<Value = Stage> {
    prop_oneof![
        Just(Stage::AwaitingZip),
        arb_zip().prop_map(|zip| Stage::AwaitingBedBath { zip }),
        (arb_zip(), arb_rooms()).prop_map(|(zip, rooms)| Stage::AwaitingType { zip, rooms }),
        (arb_zip(), arb_rooms(), arb_service()).prop_map(|(zip, rooms, service)| {
            Stage::AwaitingWindow {
                zip,
                rooms,
                service,
            }
        }),
        (arb_zip(), arb_rooms(), arb_service(), arb_window()).prop_map(
            |(zip, rooms, service, window)| {
                Stage::Done(IntakeSummary {
                    zip,
                    rooms,
                    service,
                    window,
                })
            }
        ),
    ]
}

/// Mix of answers that satisfy some stage and plain noise
fn arb_message() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_zip().prop_map(|zip| format!("zip {zip}")),
        (0u32..10, 0u32..10).prop_map(|(b, t)| format!("{b} beds {t} baths")),
        Just("deep please".to_string()),
        Just("move out".to_string()),
        Just("10-12".to_string()),
        Just("8–10 am".to_string()),
        "[a-zA-Z0-9 ,.!-]{0,30}",
    ]
}

fn arb_reset() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("RESET".to_string()),
        Just("reset".to_string()),
        Just("Restart".to_string()),
        Just(" RESTART! ".to_string()),
    ]
}

/// Fields captured so far, in stage order
fn captured(stage: &Stage) -> (Option<String>, Option<Rooms>, Option<ServiceType>) {
    (stage.zip().map(str::to_string), stage.rooms(), stage.service())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Stage moves forward by at most one step per message, unless reset
    #[test]
    fn prop_stage_never_skips(messages in proptest::collection::vec(arb_message(), 0..30)) {
        let mut stage: Option<Stage> = None;

        for message in messages {
            let result = transition(stage.as_ref(), &normalize(&message));
            match result.outcome {
                Outcome::Created | Outcome::Reset => {
                    prop_assert_eq!(&result.new_stage, &Stage::AwaitingZip);
                }
                Outcome::Advanced => {
                    let before = stage.as_ref().map(Stage::ordinal);
                    prop_assert_eq!(Some(result.new_stage.ordinal()), before.map(|o| o + 1));
                }
                Outcome::Reprompted | Outcome::Unchanged => {
                    prop_assert_eq!(Some(&result.new_stage), stage.as_ref());
                }
            }
            stage = Some(result.new_stage);
        }
    }

    // Captured fields never change except through reset
    #[test]
    fn prop_captured_fields_immutable(
        start in arb_stage(),
        messages in proptest::collection::vec(arb_message(), 1..20),
    ) {
        let mut stage = start;

        for message in messages {
            let result = transition(Some(&stage), &normalize(&message));
            if result.outcome == Outcome::Reset {
                break;
            }
            let (zip, rooms, service) = captured(&stage);
            let (new_zip, new_rooms, new_service) = captured(&result.new_stage);
            if zip.is_some() {
                prop_assert_eq!(zip, new_zip);
            }
            if rooms.is_some() {
                prop_assert_eq!(rooms, new_rooms);
            }
            if service.is_some() {
                prop_assert_eq!(service, new_service);
            }
            stage = result.new_stage;
        }
    }

    // Reset from any stage lands on a fresh AwaitingZip
    #[test]
    fn prop_reset_from_any_stage(stage in arb_stage(), command in arb_reset()) {
        let result = transition(Some(&stage), &normalize(&command));
        prop_assert_eq!(result.outcome, Outcome::Reset);
        prop_assert_eq!(result.new_stage, Stage::AwaitingZip);
    }

    // Done absorbs everything except reset
    #[test]
    fn prop_done_is_absorbing(
        summary in (arb_zip(), arb_rooms(), arb_service(), arb_window()),
        message in arb_message(),
    ) {
        let (zip, rooms, service, window) = summary;
        let done = Stage::Done(IntakeSummary { zip, rooms, service, window });
        let input = normalize(&message);
        prop_assume!(!input.is_reset());

        let result = transition(Some(&done), &input);
        prop_assert_eq!(result.outcome, Outcome::Unchanged);
        prop_assert_eq!(result.new_stage, done);
    }

    // Normalization is deterministic and yields only lowercase text and ASCII digit runs
    #[test]
    fn prop_normalize_shape(raw in "\\PC{0,40}") {
        let a = normalize(&raw);
        let b = normalize(&raw);
        prop_assert_eq!(&a, &b);
        prop_assert!(a.digit_runs.iter().all(|run| !run.is_empty() && run.bytes().all(|c| c.is_ascii_digit())));
        prop_assert!(a.standalone_runs.len() <= a.digit_runs.len());
        prop_assert!(a.standalone_runs.iter().all(|run| a.digit_runs.contains(run)));
        prop_assert!(!a.text.starts_with(' ') && !a.text.ends_with(' '));
        prop_assert!(!a.text.contains("  "));
    }
}
