//! Intents for the recon screen.

use crate::gateway::InferenceOutcome;
use crate::ui::mvi::Intent;

/// Intents that can be dispatched to the recon screen.
#[derive(Debug, Clone)]
pub enum ReconIntent {
    /// The user submitted an image. Starts a new generation.
    Submit,

    /// A background submission finished.
    Complete {
        /// Generation the submission was tagged with.
        generation: u64,
        outcome: InferenceOutcome,
    },
}

impl Intent for ReconIntent {}
