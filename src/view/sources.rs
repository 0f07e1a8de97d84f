//! Listing of every known source with its latest counters.
//!
//! Rows are ordered by sorted source name. The selectable index space spans
//! inputs first, then outputs: index `i < inputs.len()` is `inputs[i]`,
//! otherwise `outputs[i - inputs.len()]`.

use crate::fmt::format_counter;
use crate::rates::{ResetPolicy, latest_delta};
use crate::storage::{CounterSeries, Namespace, SeriesStore};

use super::common::{RowStyleClass, TableViewModel, ViewCell, ViewRow};

/// A source picked from the listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    pub namespace: Namespace,
    pub name: String,
}

/// Maps a selectable index onto the sorted input and output names.
pub fn resolve_selection(
    index: usize,
    inputs: &[String],
    outputs: &[String],
) -> Option<SourceRef> {
    if index < inputs.len() {
        return Some(SourceRef {
            namespace: Namespace::Input,
            name: inputs[index].clone(),
        });
    }
    outputs.get(index - inputs.len()).map(|name| SourceRef {
        namespace: Namespace::Output,
        name: name.clone(),
    })
}

/// Tables shown in the listing and under the detail charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcesView {
    pub inputs: TableViewModel<String>,
    pub outputs: TableViewModel<String>,
    /// Number of selectable rows (`inputs + outputs`).
    pub selectable: usize,
    /// Source at the selected index, if any.
    pub selected: Option<SourceRef>,
}

/// Builds both tables from the store.
pub fn build_sources_view(store: &SeriesStore, selected_index: usize) -> SourcesView {
    let input_names = store.input_names();
    let output_names = store.output_names();
    let selected = resolve_selection(selected_index, &input_names, &output_names);
    let cycles = store.cycles();

    let is_selected = |namespace: Namespace, name: &str| {
        selected
            .as_ref()
            .is_some_and(|s| s.namespace == namespace && s.name == name)
    };

    let inputs = build_table(
        "Inputs",
        &input_names,
        |name| store.input(name),
        cycles,
        |name| is_selected(Namespace::Input, name),
    );
    let outputs = build_table(
        "Outputs",
        &output_names,
        |name| store.output(name),
        cycles,
        |name| is_selected(Namespace::Output, name),
    );

    SourcesView {
        inputs,
        outputs,
        selectable: input_names.len() + output_names.len(),
        selected,
    }
}

fn build_table<'a, S, G, P>(
    title: &str,
    names: &[String],
    get: G,
    cycles: u64,
    is_selected: P,
) -> TableViewModel<String>
where
    S: CounterSeries + 'a,
    G: Fn(&str) -> Option<&'a S>,
    P: Fn(&str) -> bool,
{
    let mut headers = vec!["name".to_string()];
    for field in S::FIELD_NAMES {
        headers.push(field.to_string());
        headers.push(format!("Δ{}", field));
    }

    let rows: Vec<ViewRow<String>> = names
        .iter()
        .map(|name| {
            let series = get(name);
            let latest = series.and_then(CounterSeries::latest_values);

            let mut cells = vec![ViewCell::plain(name.clone())];
            match (series, latest) {
                (Some(series), Some(values)) => {
                    for (i, field) in S::FIELD_NAMES.iter().enumerate() {
                        let delta = latest_delta(series, i, cycles, ResetPolicy::Zero);
                        cells.push(value_cell(field, values[i]));
                        cells.push(ViewCell::plain(format!(
                            "+{}",
                            format_counter(field, delta)
                        )));
                    }
                }
                _ => {
                    for _ in S::FIELD_NAMES {
                        cells.push(ViewCell::styled(
                            "no data yet".to_string(),
                            RowStyleClass::Dimmed,
                        ));
                        cells.push(ViewCell::plain(String::new()));
                    }
                }
            }

            let style = if is_selected(name) {
                RowStyleClass::Selected
            } else {
                RowStyleClass::Normal
            };
            ViewRow {
                id: name.clone(),
                cells,
                style,
            }
        })
        .collect();

    TableViewModel {
        title: format!(" {} ({}) ", title, names.len()),
        widths: TableViewModel::fit_widths(&headers, &rows),
        headers,
        rows,
    }
}

fn value_cell(field: &str, value: u64) -> ViewCell {
    let text = format_counter(field, value);
    if matches!(field, "errors" | "retries_failed") && value > 0 {
        ViewCell::styled(text, RowStyleClass::Critical)
    } else {
        ViewCell::plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MetricInput, MetricOutput, Metrics};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn store() -> SeriesStore {
        let mut store = SeriesStore::new();
        let mut metrics = Metrics::default();
        metrics.input.insert(
            "tail.1".to_string(),
            MetricInput {
                records: 10,
                bytes: 100,
            },
        );
        metrics.input.insert(
            "cpu.0".to_string(),
            MetricInput {
                records: 4,
                bytes: 40,
            },
        );
        metrics.output.insert(
            "stdout.0".to_string(),
            MetricOutput {
                proc_records: 3,
                errors: 2,
                ..MetricOutput::default()
            },
        );
        store.append(&metrics);

        metrics.input.insert(
            "cpu.0".to_string(),
            MetricInput {
                records: 9,
                bytes: 90,
            },
        );
        store.append(&metrics);
        store
    }

    #[test]
    fn selection_spans_inputs_then_outputs() {
        let inputs = names(&["a", "b"]);
        let outputs = names(&["x"]);

        let first = resolve_selection(0, &inputs, &outputs).unwrap();
        assert_eq!(first.namespace, Namespace::Input);
        assert_eq!(first.name, "a");

        let out = resolve_selection(2, &inputs, &outputs).unwrap();
        assert_eq!(out.namespace, Namespace::Output);
        assert_eq!(out.name, "x");

        assert_eq!(resolve_selection(3, &inputs, &outputs), None);
        assert_eq!(resolve_selection(0, &[], &[]), None);
    }

    #[test]
    fn sources_view_rows_are_sorted_with_latest_values() {
        let view = build_sources_view(&store(), 0);

        assert_eq!(view.selectable, 3);
        let ids: Vec<&str> = view.inputs.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["cpu.0", "tail.1"]);

        let cpu = &view.inputs.rows[0];
        assert_eq!(cpu.style, RowStyleClass::Selected);
        assert_eq!(cpu.cells[1].text, "9");
        assert_eq!(cpu.cells[2].text, "+5");
        assert_eq!(cpu.cells[3].text, "90B");
        assert_eq!(cpu.cells[4].text, "+50B");

        assert_eq!(view.inputs.headers[0], "name");
        assert_eq!(view.outputs.headers.len(), 11);
    }

    #[test]
    fn sources_view_selects_output_and_flags_errors() {
        let view = build_sources_view(&store(), 2);
        let selected = view.selected.unwrap();
        assert_eq!(selected.namespace, Namespace::Output);
        assert_eq!(selected.name, "stdout.0");

        let row = &view.outputs.rows[0];
        assert_eq!(row.style, RowStyleClass::Selected);
        // errors column
        assert_eq!(row.cells[5].style, Some(RowStyleClass::Critical));
    }

    #[test]
    fn sources_view_is_idempotent() {
        let store = store();
        assert_eq!(build_sources_view(&store, 1), build_sources_view(&store, 1));
    }

    #[test]
    fn empty_store_has_no_selection() {
        let view = build_sources_view(&SeriesStore::new(), 0);
        assert_eq!(view.selectable, 0);
        assert!(view.selected.is_none());
        assert!(view.inputs.rows.is_empty());
    }
}
