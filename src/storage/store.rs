//! In-memory history of every counter snapshot received from the agent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::Metrics;

use super::series::{CounterSeries, InputSeries, OutputSeries};

/// Which set of plugin instances a source name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Input,
    Output,
}

/// Series of every known source, split into input and output namespaces.
///
/// The store only grows: series are never truncated, reordered or evicted.
/// A source missing from a snapshot simply does not grow for that cycle.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    input: HashMap<String, InputSeries>,
    output: HashMap<String, OutputSeries>,
    cycles: u64,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one decoded snapshot as the next cycle.
    pub fn append(&mut self, metrics: &Metrics) {
        let cycle = self.cycles;

        for (name, counters) in &metrics.input {
            match self.input.get_mut(name) {
                Some(series) => series.push(cycle, counters),
                None => {
                    self.input
                        .insert(name.clone(), InputSeries::seeded(cycle, counters));
                }
            }
        }

        for (name, counters) in &metrics.output {
            match self.output.get_mut(name) {
                Some(series) => series.push(cycle, counters),
                None => {
                    self.output
                        .insert(name.clone(), OutputSeries::seeded(cycle, counters));
                }
            }
        }

        self.cycles += 1;
    }

    /// Number of snapshots appended so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Known source names of a namespace, sorted lexicographically.
    pub fn names(&self, namespace: Namespace) -> Vec<String> {
        let mut names: Vec<String> = match namespace {
            Namespace::Input => self.input.keys().cloned().collect(),
            Namespace::Output => self.output.keys().cloned().collect(),
        };
        names.sort();
        names
    }

    pub fn input_names(&self) -> Vec<String> {
        self.names(Namespace::Input)
    }

    pub fn output_names(&self) -> Vec<String> {
        self.names(Namespace::Output)
    }

    pub fn input(&self, name: &str) -> Option<&InputSeries> {
        self.input.get(name)
    }

    pub fn output(&self, name: &str) -> Option<&OutputSeries> {
        self.output.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.output.is_empty()
    }
}

/// [`SeriesStore`] shared between the poll thread and the UI.
///
/// The lock is held for one append or one read closure and never across I/O.
#[derive(Debug, Clone, Default)]
pub struct SharedSeriesStore {
    inner: Arc<Mutex<SeriesStore>>,
}

impl SharedSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SeriesStore> {
        // A panic while holding the lock cannot leave the series misaligned:
        // `append` only pushes whole records.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a snapshot under the lock and returns the new cycle count.
    pub fn append(&self, metrics: &Metrics) -> u64 {
        let mut store = self.lock();
        store.append(metrics);
        store.cycles()
    }

    /// Runs `f` against a consistent view of the store.
    pub fn read<R>(&self, f: impl FnOnce(&SeriesStore) -> R) -> R {
        f(&self.lock())
    }
}
