//! Input and output tables.
//! Thin TUI wrapper over [`crate::view::sources::build_sources_view`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState};

use crate::tui::style::Styles;
use crate::view::common::{RowStyleClass, TableViewModel};
use crate::view::sources::SourcesView;

/// Renders the listing screen: inputs on top, outputs below.
pub fn render_sources(frame: &mut Frame, area: Rect, view: &SourcesView) {
    if view.selectable == 0 {
        let msg = Paragraph::new("Waiting for the first metrics snapshot...")
            .style(Styles::dim())
            .block(Block::default().title(" Sources ").borders(Borders::ALL));
        frame.render_widget(Clear, area);
        frame.render_widget(msg, area);
        return;
    }

    // Two border lines and the header row on top of the data rows.
    let inputs_height = view.inputs.rows.len() as u16 + 3;
    let chunks =
        Layout::vertical([Constraint::Max(inputs_height), Constraint::Min(4)]).split(area);

    render_table(frame, chunks[0], &view.inputs);
    render_table(frame, chunks[1], &view.outputs);
}

/// Renders one view-model table, keeping the selected row in view.
pub fn render_table(frame: &mut Frame, area: Rect, vm: &TableViewModel<String>) {
    let header_cells: Vec<Span> = vm
        .headers
        .iter()
        .map(|h| Span::styled(h.clone(), Styles::table_header()))
        .collect();
    let header = Row::new(header_cells).style(Styles::table_header());

    let widths: Vec<Constraint> = vm.widths.iter().map(|&w| Constraint::Length(w)).collect();

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let style = Styles::from_class(vr.style);
            let cells = vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(style)
        })
        .collect();

    let selected = vm
        .rows
        .iter()
        .position(|r| r.style == RowStyleClass::Selected);
    let mut table_state = TableState::default().with_selected(selected);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(vm.title.clone())
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(2)
        .row_highlight_style(Styles::selected());

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, &mut table_state);
}
