//! Detail screen: one line chart per counter field and a summary table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph};

use crate::fmt::format_counter;
use crate::tui::style::Styles;
use crate::view::detail::{ChartView, DetailView};

use super::sources::render_table;

const CHART_COLUMNS: usize = 2;

/// Renders the detail of one source.
pub fn render_detail(frame: &mut Frame, area: Rect, view: Option<&DetailView>) {
    let Some(view) = view else {
        let msg = Paragraph::new("Source is not known yet")
            .style(Styles::dim())
            .block(Block::default().title(" Detail ").borders(Borders::ALL));
        frame.render_widget(Clear, area);
        frame.render_widget(msg, area);
        return;
    };

    let summary_height = view.summary.rows.len() as u16 + 3;
    let chunks =
        Layout::vertical([Constraint::Min(8), Constraint::Length(summary_height)]).split(area);

    let block = Block::default()
        .title(view.title.clone())
        .borders(Borders::ALL)
        .style(Styles::default());
    let charts_area = block.inner(chunks[0]);
    frame.render_widget(Clear, chunks[0]);
    frame.render_widget(block, chunks[0]);

    let grid_rows = view.charts.len().div_ceil(CHART_COLUMNS).max(1);
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, grid_rows as u32); grid_rows])
        .split(charts_area);

    for (row, charts) in view.charts.chunks(CHART_COLUMNS).enumerate() {
        let cell_areas = Layout::horizontal(vec![
            Constraint::Ratio(1, charts.len() as u32);
            charts.len()
        ])
        .split(row_areas[row]);
        for (col, chart) in charts.iter().enumerate() {
            render_chart(frame, cell_areas[col], chart, row * CHART_COLUMNS + col);
        }
    }

    render_table(frame, chunks[1], &view.summary);
}

fn render_chart(frame: &mut Frame, area: Rect, chart: &ChartView, index: usize) {
    let points = chart.points();
    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);
    let y_max = chart.max();
    let y_upper = (y_max as f64).max(1.0);

    let block = Block::default()
        .title(format!(" {} ", chart.caption))
        .borders(Borders::ALL);

    if points.is_empty() {
        let msg = Paragraph::new("not enough observations")
            .style(Styles::dim())
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Styles::chart(index))
        .data(&points);

    let widget = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Styles::dim())
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(Styles::dim())
                .bounds([0.0, y_upper])
                .labels(vec![
                    Span::from("0"),
                    Span::from(format_counter(chart.field, y_max / 2)),
                    Span::from(format_counter(chart.field, y_max)),
                ]),
        );
    frame.render_widget(widget, area);
}
