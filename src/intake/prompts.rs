//! Reply texts for the intake flow

use super::state::{IntakeSummary, Rooms, ServiceType};

pub const ZIP_PROMPT: &str =
    "Hi! Let's get your cleaning quote started. What is the 5-digit ZIP code of the property?";

pub const ZIP_REPROMPT: &str =
    "I couldn't find a ZIP code in that message. Please reply with a 5-digit ZIP code, like 90210.";

pub const BED_BATH_REPROMPT: &str =
    "Please send two numbers: bedrooms first, then bathrooms. For example: 3 bedrooms 2 baths.";

pub const SERVICE_REPROMPT: &str =
    "Which service would you like? Reply Standard, Deep, or Move-Out.";

pub const WINDOW_REPROMPT: &str =
    "Please pick one of the available windows: 8–10 AM, 10–12 PM, or 1–3 PM.";

pub const DONE_HELP: &str =
    "Your request is already in and we'll be in touch soon. Reply RESET to start a new quote.";

/// Reply when a message cannot be tied to any session
pub const GENERIC_HELP: &str = "We're here to help! Reply RESET to start a cleaning quote.";

pub fn bed_bath_prompt(zip: &str) -> String {
    format!("Got it, ZIP {zip}. How many bedrooms and bathrooms? For example: 3 bedrooms 2 baths.")
}

pub fn service_prompt(rooms: Rooms) -> String {
    format!(
        "Thanks! {} bedroom(s), {} bathroom(s). Which service: Standard, Deep, or Move-Out?",
        rooms.bedrooms, rooms.bathrooms
    )
}

pub fn window_prompt(service: ServiceType) -> String {
    format!("{service} cleaning it is. Which window works best: 8–10 AM, 10–12 PM, or 1–3 PM?")
}

pub fn summary(summary: &IntakeSummary) -> String {
    format!(
        "All set! Here's your request:\n\
         ZIP: {}\n\
         Bedrooms: {}\n\
         Bathrooms: {}\n\
         Service: {}\n\
         Window: {}\n\
         We'll confirm shortly. Reply RESET to start over.",
        summary.zip,
        summary.rooms.bedrooms,
        summary.rooms.bathrooms,
        summary.service,
        summary.window
    )
}
