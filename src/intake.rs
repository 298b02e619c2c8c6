//! Cleaning intake state machine
//!
//! Walks a caller through ZIP, bedroom/bathroom counts, service type and
//! arrival window. Transitions are pure; the session store and the flow
//! controller apply them.

pub mod normalize;
pub mod prompts;
pub mod state;
mod transition;
mod validate;

#[cfg(test)]
mod proptests;

pub use normalize::{normalize, NormalizedInput};
pub use state::Session;
pub use transition::{transition, Outcome, TransitionResult};
