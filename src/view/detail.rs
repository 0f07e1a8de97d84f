//! Detail of a single source: one chart per counter field plus a summary.

use crate::fmt::format_counter;
use crate::rates::{ResetPolicy, cycle_deltas, latest_delta, windowed};
use crate::storage::{CounterSeries, Namespace, SeriesStore};

use super::common::{RowStyleClass, TableViewModel, ViewCell, ViewRow};
use super::sources::SourceRef;

/// Which derived series the charts show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlotMode {
    /// Whole-history deltas with reset pairs dropped.
    #[default]
    Trend,
    /// Per-cycle deltas where a reset counts as its magnitude and an absent
    /// source counts as zero.
    Magnitude,
}

impl PlotMode {
    pub fn toggle(self) -> Self {
        match self {
            PlotMode::Trend => PlotMode::Magnitude,
            PlotMode::Magnitude => PlotMode::Trend,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlotMode::Trend => "trend",
            PlotMode::Magnitude => "magnitude",
        }
    }
}

/// Data for one line chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartView {
    pub caption: String,
    /// Field name, used to pick units for axis labels.
    pub field: &'static str,
    pub values: Vec<u64>,
}

impl ChartView {
    /// `(x, y)` pairs with `x` being the position in `values`.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v as f64))
            .collect()
    }

    /// Largest value, `0` for an empty chart.
    pub fn max(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub source: SourceRef,
    pub mode: PlotMode,
    pub charts: Vec<ChartView>,
    pub summary: TableViewModel<String>,
}

/// Builds the detail of `source`, or `None` when the store does not know it.
pub fn build_detail_view(
    store: &SeriesStore,
    source: &SourceRef,
    mode: PlotMode,
) -> Option<DetailView> {
    let cycles = store.cycles();
    let (charts, summary) = match source.namespace {
        Namespace::Input => {
            let series = store.input(&source.name)?;
            (
                build_charts(series, "input", &source.name, cycles, mode),
                build_summary(series, cycles),
            )
        }
        Namespace::Output => {
            let series = store.output(&source.name)?;
            (
                build_charts(series, "output", &source.name, cycles, mode),
                build_summary(series, cycles),
            )
        }
    };

    Some(DetailView {
        title: format!(" {} ({}) ", source.name, mode.label()),
        source: source.clone(),
        mode,
        charts,
        summary,
    })
}

fn build_charts<S: CounterSeries>(
    series: &S,
    kind: &str,
    name: &str,
    cycles: u64,
    mode: PlotMode,
) -> Vec<ChartView> {
    S::FIELD_NAMES
        .iter()
        .enumerate()
        .map(|(i, &field)| {
            let values = match mode {
                PlotMode::Trend => windowed(series.field(i), ResetPolicy::Drop),
                PlotMode::Magnitude => cycle_deltas(series, i, cycles, ResetPolicy::Magnitude),
            };
            ChartView {
                caption: format!("{} {} {} rate", kind, name, field),
                field,
                values,
            }
        })
        .collect()
}

fn build_summary<S: CounterSeries>(series: &S, cycles: u64) -> TableViewModel<String> {
    let headers: Vec<String> = ["field", "latest", "Δ", "observations"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let latest = series.latest_values();

    let rows: Vec<ViewRow<String>> = S::FIELD_NAMES
        .iter()
        .enumerate()
        .map(|(i, &field)| {
            let (value, delta, style) = match &latest {
                Some(values) => (
                    format_counter(field, values[i]),
                    format!(
                        "+{}",
                        format_counter(field, latest_delta(series, i, cycles, ResetPolicy::Zero))
                    ),
                    RowStyleClass::Normal,
                ),
                None => ("no data yet".to_string(), String::new(), RowStyleClass::Dimmed),
            };
            ViewRow {
                id: field.to_string(),
                cells: vec![
                    ViewCell::plain(field.to_string()),
                    ViewCell::plain(value),
                    ViewCell::plain(delta),
                    ViewCell::plain(series.len().to_string()),
                ],
                style,
            }
        })
        .collect();

    TableViewModel {
        title: " Summary ".to_string(),
        widths: TableViewModel::fit_widths(&headers, &rows),
        headers,
        rows,
    }
}
