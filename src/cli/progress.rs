//! Progress bar for long simulations, using indicatif.

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const PROGRESS_TEMPLATE: &str = "{bar:40.cyan/blue} {pos}/{len} {msg} (ETA: {eta})";
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Simulations shorter than this finish too fast for a bar to be useful.
pub const PROGRESS_THRESHOLD: u64 = 10_000;

/// Create a progress bar for `total` runs.
///
/// The bar is hidden when `total` is below [`PROGRESS_THRESHOLD`], when JSON
/// output is requested, or when stderr is not a terminal.
pub fn simulation_progress(total: u64, json_mode: bool) -> ProgressBar {
    let visible = !json_mode && total >= PROGRESS_THRESHOLD && Term::stderr().is_term();
    let pb = ProgressBar::with_draw_target(
        Some(total),
        if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        },
    );
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(PROGRESS_CHARS),
    );
    pb.set_message("sampling");
    pb
}
