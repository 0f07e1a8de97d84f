//! Bottom lines: last fetch error and key help.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, Screen};
use crate::tui::style::Styles;

/// Renders the most recent fetch error, or nothing.
pub fn render_error_line(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(err) = &state.last_error {
        let line = Line::from(vec![
            Span::styled(" error: ", Styles::critical()),
            Span::styled(err.clone(), Styles::critical()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Renders the key help for the current screen.
pub fn render_help_line(frame: &mut Frame, area: Rect, state: &AppState) {
    let keys: &[(&str, &str)] = match state.screen {
        Screen::ConfiguringAddress | Screen::ConfiguringInterval => {
            &[("Enter", "accept"), ("Esc", "quit")]
        }
        Screen::Listing => &[
            ("↑↓/jk/Tab", "select"),
            ("Enter", "details"),
            ("q", "quit"),
        ],
        Screen::Detail => &[
            ("Esc", "back"),
            ("m", "toggle trend/magnitude"),
            ("q", "quit"),
        ],
    };

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, what)| {
            [
                Span::styled(format!(" {}", key), Styles::help_key()),
                Span::styled(format!(" {} ", what), Styles::help()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
