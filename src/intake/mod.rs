//! Conversational intake — profile model, extraction heuristics, and the
//! per-turn responder.

pub mod extract;
pub mod profile;
pub mod prompts;
pub mod responder;

pub use extract::extract;
pub use profile::{Profile, ProfileField};
pub use responder::{ChatOutcome, Responder};
