//! TUI widgets.

mod detail;
mod footer;
mod header;
mod prompt;
mod quit_confirm;
mod sources;

pub use detail::render_detail;
pub use footer::{render_error_line, render_help_line};
pub use header::render_header;
pub use prompt::render_prompt;
pub use quit_confirm::render_quit_confirm;
pub use sources::render_sources;
