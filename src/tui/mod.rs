//! Terminal User Interface for fbtop.
//!
//! Prompts for the agent address and poll interval, then shows every input
//! and output with its latest counters and, on demand, charts of one source.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, DEFAULT_ADDRESS, DEFAULT_INTERVAL, PopupState, Screen};
