//! State for the recon screen.

use crate::ui::mvi::UiState;

/// Text shown before the first submission.
pub const PLACEHOLDER: &str = "Pick a photo and press Go to find out what it shows.";

/// What the result area shows. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultState {
    /// Nothing submitted yet.
    Idle { placeholder: String },

    /// A submission is in flight.
    Loading,

    /// The backend answered.
    Success { output: String },

    /// Decoding or inference failed.
    Error { message: String },
}

impl Default for ResultState {
    fn default() -> Self {
        Self::Idle {
            placeholder: PLACEHOLDER.to_string(),
        }
    }
}

impl UiState for ResultState {}

impl ResultState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Text to display, if the state carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Idle { placeholder } => Some(placeholder),
            Self::Loading => None,
            Self::Success { output } => Some(output),
            Self::Error { message } => Some(message),
        }
    }
}

/// Screen state: the visible result plus the current submission generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconScreen {
    /// Tag of the latest submission; 0 before the first one.
    pub generation: u64,
    pub result: ResultState,
}

impl UiState for ReconScreen {}
