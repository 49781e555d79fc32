//! Text rendering of the recon screen.

use crossterm::style::Stylize;

use crate::resolver::samples;
use crate::ui::recon::ResultState;
use crate::ui::theme::{MUTED, STATUS_ERROR, TITLE};

pub const TITLE_TEXT: &str = "Photo recon";
pub const LOADING_TEXT: &str = "Asking the model...";

/// Render the result area. Errors are drawn in the error color.
pub fn render_result(state: &ResultState) -> String {
    match state {
        ResultState::Idle { placeholder } => placeholder.as_str().with(MUTED).to_string(),
        ResultState::Loading => LOADING_TEXT.with(MUTED).to_string(),
        ResultState::Success { output } => output.clone(),
        ResultState::Error { message } => message.as_str().with(STATUS_ERROR).to_string(),
    }
}

/// Title plus the sample grid, one tile per line.
pub fn render_header() -> String {
    let mut out = format!("{}\n\n", TITLE_TEXT.with(TITLE).bold());
    for (index, sample) in samples::catalogue().iter().enumerate() {
        out.push_str(&format!("  [{}] {:<8} {}\n", index, sample.name, sample.description));
    }
    out.push_str(&format!(
        "\n{}\n",
        "Type a number to submit a sample, `open <path>` to pick a photo, `quit` to exit."
            .with(MUTED)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_text_is_unstyled() {
        let state = ResultState::Success {
            output: "A mockingbird on a branch.".into(),
        };
        assert_eq!(render_result(&state), "A mockingbird on a branch.");
    }

    #[test]
    fn error_text_is_intact() {
        let state = ResultState::Error {
            message: "Quota exceeded".into(),
        };
        let rendered = render_result(&state);
        assert!(rendered.contains("Quota exceeded"));
    }

    #[test]
    fn loading_shows_progress() {
        assert!(render_result(&ResultState::Loading).contains(LOADING_TEXT));
    }

    #[test]
    fn header_lists_every_sample() {
        let header = render_header();
        for sample in samples::catalogue() {
            assert!(header.contains(sample.name));
        }
    }
}
