//! Header bar: clock, agent identity and poll progress.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::format_duration;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Min(30),    // Build info / origin
        Constraint::Length(36), // Uptime and cycles
    ])
    .split(area);

    let time_str = Local::now().format(" %Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    let mut agent = vec![Span::styled(" fbtop ", Styles::header())];
    match &state.build_info {
        Some(info) => agent.push(Span::styled(
            format!(
                "Fluent Bit version={} edition={}",
                info.fluent_bit.version, info.fluent_bit.edition
            ),
            Styles::header(),
        )),
        None => agent.push(Span::styled("Fluent Bit", Styles::header())),
    }
    if let Some(origin) = &state.origin {
        agent.push(Span::styled(format!("  {}", origin), Styles::header()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(agent)).style(Styles::header()),
        chunks[1],
    );

    let uptime = state
        .uptime
        .as_ref()
        .map(|u| format_duration(u.uptime_sec))
        .unwrap_or_else(|| "-".to_string());
    let status = format!("up {}  cycles {} ", uptime, state.cycles);
    frame.render_widget(
        Paragraph::new(status)
            .style(Styles::header())
            .alignment(Alignment::Right),
        chunks[2],
    );
}
