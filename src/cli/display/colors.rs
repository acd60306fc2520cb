//! Styling helpers for CLI output.
//!
//! console disables styling automatically when stdout is not a terminal.

use console::{style, StyledObject};

/// Styled sample result: sentinels are dimmed, tokens bold green.
pub fn result_style(text: &str, is_sentinel: bool) -> StyledObject<&str> {
    if is_sentinel {
        style(text).yellow().dim()
    } else {
        style(text).green().bold()
    }
}

/// Section header with underline.
pub fn section_header(title: &str) -> String {
    format!("\n{}", style(title).bold().underlined())
}

/// Styled label for prompts and detail lines.
pub fn label(name: &str) -> String {
    format!("{}{}", style(name).bold(), style(":").dim())
}
