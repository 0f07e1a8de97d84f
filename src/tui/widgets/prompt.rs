//! Configuration prompts shown before polling starts.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::state::{AppState, Screen};
use crate::tui::style::Styles;

/// Renders the address or interval prompt, centered in `area`.
pub fn render_prompt(frame: &mut Frame, area: Rect, state: &AppState) {
    let (title, label, input) = match state.screen {
        Screen::ConfiguringInterval => (
            " Pull interval ",
            "Seconds between two fetches:",
            state.interval_input.as_str(),
        ),
        _ => (
            " Monitoring endpoint ",
            "Fluent Bit HTTP server URL:",
            state.address_input.as_str(),
        ),
    };

    let popup_width = (area.width * 60 / 100).clamp(40, 80).min(area.width);
    let popup_height = 8.min(area.height);
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut content = vec![
        Line::from(Span::styled(label, Styles::default())),
        Line::from(vec![
            Span::styled(input.to_string(), Styles::prompt_input()),
            Span::styled("_", Styles::dim()),
        ]),
        Line::from(""),
    ];
    match &state.input_error {
        Some(err) => content.push(Line::from(Span::styled(err.clone(), Styles::critical()))),
        None => content.push(Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled(" accept  ", Styles::help()),
            Span::styled("Esc", Styles::help_key()),
            Span::styled(" quit", Styles::help()),
        ])),
    }

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
