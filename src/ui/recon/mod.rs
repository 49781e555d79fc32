//! Recon screen feature module.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Result state enum and the screen wrapper
//! - `intent.rs` - Submissions and completions
//! - `reducer.rs` - State transitions

mod intent;
mod reducer;
mod state;

pub use intent::ReconIntent;
pub use reducer::ReconReducer;
pub use state::{ReconScreen, ResultState, PLACEHOLDER};
