//! Pure intake transition function
//!
//! Given the caller's current stage (if any) and a normalized message, decide
//! the next stage and the reply. No I/O, no clock.

use super::normalize::NormalizedInput;
use super::prompts;
use super::state::{IntakeSummary, Stage};
use super::validate::{extract_rooms, extract_zip, match_service_type, match_time_window};

/// What a transition did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No session existed; a fresh one starts at `AwaitingZip`
    Created,
    /// Reset command; any prior session is replaced
    Reset,
    /// The stage validator accepted the input
    Advanced,
    /// The stage validator rejected the input
    Reprompted,
    /// Input at `Done`; nothing is reinterpreted
    Unchanged,
}

/// Result of a state transition
#[derive(Debug, Clone)]
pub struct TransitionResult {
    pub new_stage: Stage,
    pub outcome: Outcome,
    pub reply: String,
}

impl TransitionResult {
    fn new(new_stage: Stage, outcome: Outcome, reply: impl Into<String>) -> Self {
        Self {
            new_stage,
            outcome,
            reply: reply.into(),
        }
    }

    fn stay(stage: &Stage, outcome: Outcome, reply: impl Into<String>) -> Self {
        Self::new(stage.clone(), outcome, reply)
    }
}

pub fn transition(current: Option<&Stage>, input: &NormalizedInput) -> TransitionResult {
    if input.is_reset() {
        return TransitionResult::new(Stage::AwaitingZip, Outcome::Reset, prompts::ZIP_PROMPT);
    }

    let Some(stage) = current else {
        return TransitionResult::new(Stage::AwaitingZip, Outcome::Created, prompts::ZIP_PROMPT);
    };

    match stage {
        Stage::AwaitingZip => match extract_zip(input) {
            Some(zip) => {
                let reply = prompts::bed_bath_prompt(&zip);
                TransitionResult::new(Stage::AwaitingBedBath { zip }, Outcome::Advanced, reply)
            }
            None => TransitionResult::stay(stage, Outcome::Reprompted, prompts::ZIP_REPROMPT),
        },

        Stage::AwaitingBedBath { zip } => match extract_rooms(input) {
            Some(rooms) => TransitionResult::new(
                Stage::AwaitingType {
                    zip: zip.clone(),
                    rooms,
                },
                Outcome::Advanced,
                prompts::service_prompt(rooms),
            ),
            None => TransitionResult::stay(stage, Outcome::Reprompted, prompts::BED_BATH_REPROMPT),
        },

        Stage::AwaitingType { zip, rooms } => match match_service_type(input) {
            Some(service) => TransitionResult::new(
                Stage::AwaitingWindow {
                    zip: zip.clone(),
                    rooms: *rooms,
                    service,
                },
                Outcome::Advanced,
                prompts::window_prompt(service),
            ),
            None => TransitionResult::stay(stage, Outcome::Reprompted, prompts::SERVICE_REPROMPT),
        },

        Stage::AwaitingWindow {
            zip,
            rooms,
            service,
        } => match match_time_window(input) {
            Some(window) => {
                let summary = IntakeSummary {
                    zip: zip.clone(),
                    rooms: *rooms,
                    service: *service,
                    window,
                };
                let reply = prompts::summary(&summary);
                TransitionResult::new(Stage::Done(summary), Outcome::Advanced, reply)
            }
            None => TransitionResult::stay(stage, Outcome::Reprompted, prompts::WINDOW_REPROMPT),
        },

        Stage::Done(_) => TransitionResult::stay(stage, Outcome::Unchanged, prompts::DONE_HELP),
    }
}
