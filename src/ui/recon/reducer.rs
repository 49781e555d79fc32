//! Reducer for the recon screen.

use crate::gateway::InferenceOutcome;
use crate::ui::mvi::Reducer;

use super::intent::ReconIntent;
use super::state::{ReconScreen, ResultState};

/// Reducer for recon screen state transitions.
///
/// `Submit` always moves to `Loading` under a fresh generation. `Complete`
/// only lands when it belongs to the current generation and the screen is
/// still loading; anything else is stale and leaves the state untouched.
pub struct ReconReducer;

impl Reducer for ReconReducer {
    type State = ReconScreen;
    type Intent = ReconIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ReconIntent::Submit => ReconScreen {
                generation: state.generation + 1,
                result: ResultState::Loading,
            },

            ReconIntent::Complete {
                generation,
                outcome,
            } => {
                if generation != state.generation || !state.result.is_loading() {
                    return state;
                }

                let result = match outcome {
                    InferenceOutcome::Ok(output) => ResultState::Success { output },
                    InferenceOutcome::Fail(failure) => ResultState::Error {
                        message: failure.message,
                    },
                };

                ReconScreen { generation, result }
            }
        }
    }
}
