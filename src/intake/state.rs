//! Intake session types

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Cleaning service offered in the intake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Standard,
    Deep,
    MoveOut,
}

impl ServiceType {
    pub fn label(self) -> &'static str {
        match self {
            ServiceType::Standard => "Standard",
            ServiceType::Deep => "Deep",
            ServiceType::MoveOut => "Move-Out",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Arrival window slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    EarlyMorning,
    LateMorning,
    Afternoon,
}

impl TimeWindow {
    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::EarlyMorning => "8–10 AM",
            TimeWindow::LateMorning => "10–12 PM",
            TimeWindow::Afternoon => "1–3 PM",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bedroom and bathroom counts, in the order the caller gave them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rooms {
    pub bedrooms: u32,
    pub bathrooms: u32,
}

/// Everything captured by a finished intake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSummary {
    pub zip: String,
    pub rooms: Rooms,
    pub service: ServiceType,
    pub window: TimeWindow,
}

/// Intake stage.
///
/// Each variant carries exactly the fields captured before it, so a field
/// for a stage not yet reached cannot be set and an accepted field can only
/// change by replacing the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    AwaitingZip,
    AwaitingBedBath {
        zip: String,
    },
    AwaitingType {
        zip: String,
        rooms: Rooms,
    },
    AwaitingWindow {
        zip: String,
        rooms: Rooms,
        service: ServiceType,
    },
    Done(IntakeSummary),
}

impl Stage {
    /// Position in the fixed intake sequence
    #[cfg(test)]
    pub fn ordinal(&self) -> u8 {
        match self {
            Stage::AwaitingZip => 0,
            Stage::AwaitingBedBath { .. } => 1,
            Stage::AwaitingType { .. } => 2,
            Stage::AwaitingWindow { .. } => 3,
            Stage::Done(_) => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::AwaitingZip => "awaiting_zip",
            Stage::AwaitingBedBath { .. } => "awaiting_bed_bath",
            Stage::AwaitingType { .. } => "awaiting_type",
            Stage::AwaitingWindow { .. } => "awaiting_window",
            Stage::Done(_) => "done",
        }
    }

    pub fn zip(&self) -> Option<&str> {
        match self {
            Stage::AwaitingZip => None,
            Stage::AwaitingBedBath { zip }
            | Stage::AwaitingType { zip, .. }
            | Stage::AwaitingWindow { zip, .. } => Some(zip),
            Stage::Done(summary) => Some(&summary.zip),
        }
    }

    pub fn rooms(&self) -> Option<Rooms> {
        match self {
            Stage::AwaitingZip | Stage::AwaitingBedBath { .. } => None,
            Stage::AwaitingType { rooms, .. } | Stage::AwaitingWindow { rooms, .. } => {
                Some(*rooms)
            }
            Stage::Done(summary) => Some(summary.rooms),
        }
    }

    pub fn service(&self) -> Option<ServiceType> {
        match self {
            Stage::AwaitingWindow { service, .. } => Some(*service),
            Stage::Done(summary) => Some(summary.service),
            _ => None,
        }
    }

    pub fn window(&self) -> Option<TimeWindow> {
        match self {
            Stage::Done(summary) => Some(summary.window),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Stage::Done(_))
    }
}

/// One caller's intake progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub caller_id: String,
    pub stage: Stage,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(caller_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            caller_id: caller_id.into(),
            stage: Stage::AwaitingZip,
            updated_at: now,
        }
    }

    /// A finished session older than `ttl` no longer counts as live.
    /// Unfinished sessions never expire.
    pub fn is_expired(&self, ttl: Option<TimeDelta>, now: DateTime<Utc>) -> bool {
        match ttl {
            Some(ttl) if self.stage.is_done() => now - self.updated_at > ttl,
            _ => false,
        }
    }
}
