//! Stage validators
//!
//! Each returns the value its stage captures, or `None` to re-prompt.
//! Matching is literal substring containment over normalized text.

use super::normalize::NormalizedInput;
use super::state::{Rooms, ServiceType, TimeWindow};

const ZIP_LEN: usize = 5;

/// Checked in order; first hit wins.
const SERVICE_KEYWORDS: &[(&str, ServiceType)] = &[
    ("standard", ServiceType::Standard),
    ("deep", ServiceType::Deep),
    ("move-out", ServiceType::MoveOut),
    ("move out", ServiceType::MoveOut),
    ("moveout", ServiceType::MoveOut),
];

/// Keys are matched against the compacted text (no spaces, no am/pm).
const WINDOW_KEYS: &[(&str, TimeWindow)] = &[
    ("10-12", TimeWindow::LateMorning),
    ("13-15", TimeWindow::Afternoon),
    ("1-3", TimeWindow::Afternoon),
    ("8-10", TimeWindow::EarlyMorning),
];

/// First standalone digit run that is exactly five digits long.
///
/// A run glued to letters (`abc90210`, `90210th`) is not a ZIP; punctuation
/// and ZIP+4 hyphens are fine boundaries.
pub fn extract_zip(input: &NormalizedInput) -> Option<String> {
    input
        .standalone_runs
        .iter()
        .find(|run| run.len() == ZIP_LEN)
        .cloned()
}

/// First two digit runs as bedrooms then bathrooms. Both must be positive;
/// a zero or an unparseable count re-prompts rather than skipping ahead to
/// a later run.
pub fn extract_rooms(input: &NormalizedInput) -> Option<Rooms> {
    let mut runs = input.digit_runs.iter();
    let mut count = || runs.next()?.parse::<u32>().ok().filter(|&n| n > 0);
    let bedrooms = count()?;
    let bathrooms = count()?;
    Some(Rooms {
        bedrooms,
        bathrooms,
    })
}

pub fn match_service_type(input: &NormalizedInput) -> Option<ServiceType> {
    SERVICE_KEYWORDS
        .iter()
        .find(|(keyword, _)| input.text.contains(keyword))
        .map(|(_, service)| *service)
}

pub fn match_time_window(input: &NormalizedInput) -> Option<TimeWindow> {
    let compact = compact_window_text(&input.text);
    WINDOW_KEYS
        .iter()
        .find(|(key, _)| compact.contains(key))
        .map(|(_, window)| *window)
}

fn compact_window_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<String>()
        .replace("am", "")
        .replace("pm", "")
}
