//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::storage::SeriesStore;
use crate::view::detail::{DetailView, build_detail_view};
use crate::view::sources::{SourcesView, build_sources_view};

use super::state::{AppState, PopupState, Screen};
use super::widgets::{
    render_detail, render_error_line, render_header, render_help_line, render_prompt,
    render_quit_confirm, render_sources,
};

/// View models for one frame, built from a single store read.
#[derive(Debug)]
pub struct FrameData {
    pub sources: SourcesView,
    pub detail: Option<DetailView>,
}

impl FrameData {
    pub fn build(store: &SeriesStore, state: &AppState) -> Self {
        let sources = build_sources_view(store, state.selected);
        let detail = match (state.screen, &state.detail) {
            (Screen::Detail, Some(source)) => build_detail_view(store, source, state.plot_mode),
            _ => None,
        };
        Self { sources, detail }
    }
}

/// Main render function.
pub fn render(frame: &mut Frame, state: &AppState, data: &FrameData) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(6),    // Content
        Constraint::Length(1), // Last error
        Constraint::Length(1), // Help
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    match state.screen {
        Screen::ConfiguringAddress | Screen::ConfiguringInterval => {
            render_prompt(frame, chunks[1], state)
        }
        Screen::Listing => render_sources(frame, chunks[1], &data.sources),
        Screen::Detail => render_detail(frame, chunks[1], data.detail.as_ref()),
    }

    render_error_line(frame, chunks[2], state);
    render_help_line(frame, chunks[3], state);

    // Quit confirmation popup (rendered last to overlay everything)
    if state.popup == PopupState::QuitConfirm {
        render_quit_confirm(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MetricInput, Metrics, Uptime};
    use crate::storage::Namespace;
    use crate::view::sources::SourceRef;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn store() -> SeriesStore {
        let mut store = SeriesStore::new();
        for records in [1, 3, 6, 40] {
            let mut metrics = Metrics::default();
            metrics
                .input
                .insert("cpu.0".to_string(), MetricInput { records, bytes: 0 });
            store.append(&metrics);
        }
        store
    }

    fn draw(state: &AppState, data: &FrameData) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, state, data)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn frame_data_builds_detail_only_on_detail_screen() {
        let store = store();
        let mut state = AppState::new("", "");
        state.screen = Screen::Listing;
        let data = FrameData::build(&store, &state);
        assert!(data.detail.is_none());
        assert_eq!(data.sources.selectable, 1);

        state.screen = Screen::Detail;
        state.detail = Some(SourceRef {
            namespace: Namespace::Input,
            name: "cpu.0".to_string(),
        });
        let data = FrameData::build(&store, &state);
        assert_eq!(data.detail.unwrap().charts[0].values, vec![2, 3, 34]);
    }

    #[test]
    fn renders_every_screen() {
        let store = store();
        let mut state = AppState::new("http://localhost:2020", "5");

        let screen = draw(&state, &FrameData::build(&store, &state));
        assert!(screen.contains("Monitoring endpoint"));
        assert!(screen.contains("http://localhost:2020"));

        state.screen = Screen::Listing;
        state.last_error = Some("request to /api/v1/metrics failed".to_string());
        let screen = draw(&state, &FrameData::build(&store, &state));
        assert!(screen.contains("cpu.0"));
        assert!(screen.contains("request to /api/v1/metrics failed"));

        state.screen = Screen::Detail;
        state.detail = Some(SourceRef {
            namespace: Namespace::Input,
            name: "cpu.0".to_string(),
        });
        let screen = draw(&state, &FrameData::build(&store, &state));
        assert!(screen.contains("input cpu.0 records rate"));

        state.popup = PopupState::QuitConfirm;
        let screen = draw(&state, &FrameData::build(&store, &state));
        assert!(screen.contains("Exit fbtop"));
    }

    #[test]
    fn header_shows_compact_uptime() {
        let store = store();
        let mut state = AppState::new("http://localhost:2020", "5");
        state.screen = Screen::Listing;

        let screen = draw(&state, &FrameData::build(&store, &state));
        assert!(screen.contains("up -  cycles 0"));

        state.uptime = Some(Uptime {
            uptime_sec: 3661,
            uptime_hr: "Fluent Bit has been running:  0 day, 1 hour, 1 minute and 1 second"
                .to_string(),
        });
        state.cycles = 4;
        let screen = draw(&state, &FrameData::build(&store, &state));
        assert!(screen.contains("up 1h1m  cycles 4"));
        assert!(!screen.contains("has been running"));
    }
}
