//! Terminal front end: banner, theme, and the interactive menu.

pub mod banner;
pub mod tui;

/// Prints the welcome banner and applies the prompt theme for all subsequent inquire prompts.
/// Call once at startup, after tracing init.
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
