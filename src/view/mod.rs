//! UI-agnostic view models.
//!
//! Each sub-module builds presentation data from a [`crate::storage::SeriesStore`]
//! read. The TUI then maps the view models to ratatui widgets for rendering.

pub mod common;
pub mod detail;
pub mod sources;
