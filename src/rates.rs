//! Rate derivation over counter series.
//!
//! This module is the single place that turns cumulative counters into
//! per-interval deltas. Counter resets (an observed decrease) are handled by
//! an explicit [`ResetPolicy`] chosen by each consumer:
//!
//! - trend plots use [`windowed`] with [`ResetPolicy::Drop`],
//! - the live delta column uses [`latest_delta`] with [`ResetPolicy::Zero`],
//! - the magnitude plot mode uses [`cycle_deltas`] with
//!   [`ResetPolicy::Magnitude`].

use crate::storage::CounterSeries;

/// How a pair `(prev, curr)` with `curr < prev` is turned into a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Emit nothing for the pair.
    #[default]
    Drop,
    /// Emit `0` for the pair.
    Zero,
    /// Emit `prev - curr`.
    Magnitude,
}

impl ResetPolicy {
    /// Delta between two consecutive readings, `None` when the pair is dropped.
    pub fn delta(self, prev: u64, curr: u64) -> Option<u64> {
        match self {
            ResetPolicy::Drop => (curr >= prev).then(|| curr - prev),
            ResetPolicy::Zero => Some(curr.saturating_sub(prev)),
            ResetPolicy::Magnitude => Some(curr.abs_diff(prev)),
        }
    }
}

/// Whole-history deltas of one counter field.
///
/// Fewer than three observations yield nothing; from three on, every
/// consecutive pair is visited and turned into a delta by `policy`.
pub fn windowed(values: &[u64], policy: ResetPolicy) -> Vec<u64> {
    if values.len() <= 2 {
        return Vec::new();
    }
    values
        .windows(2)
        .filter_map(|pair| policy.delta(pair[0], pair[1]))
        .collect()
}

/// Value of `field` observed at store cycle `cycle`, if the source was present.
fn value_at(cycles: &[u64], values: &[u64], cycle: u64) -> Option<u64> {
    cycles
        .binary_search(&cycle)
        .ok()
        .and_then(|idx| values.get(idx).copied())
}

/// Snapshot-history deltas of one field of `series`.
///
/// Yields one value per consecutive pair of store cycles
/// `(0, 1), (1, 2), .., (total_cycles - 2, total_cycles - 1)`. A pair in which
/// the source is absent from either cycle yields `0`; a dropped pair also
/// yields `0`, so the result is always aligned with the store's cycles.
pub fn cycle_deltas<S: CounterSeries>(
    series: &S,
    field: usize,
    total_cycles: u64,
    policy: ResetPolicy,
) -> Vec<u64> {
    let cycles = series.cycles();
    let values = series.field(field);
    (1..total_cycles)
        .map(|cycle| {
            match (
                value_at(cycles, values, cycle - 1),
                value_at(cycles, values, cycle),
            ) {
                (Some(prev), Some(curr)) => policy.delta(prev, curr).unwrap_or(0),
                _ => 0,
            }
        })
        .collect()
}

/// Delta of one field between the store's two most recent cycles.
///
/// `0` when the store has fewer than two cycles, when the source is absent
/// from either of them, or when the pair is dropped by `policy`.
pub fn latest_delta<S: CounterSeries>(
    series: &S,
    field: usize,
    total_cycles: u64,
    policy: ResetPolicy,
) -> u64 {
    if total_cycles < 2 {
        return 0;
    }
    let cycles = series.cycles();
    let values = series.field(field);
    let curr_cycle = total_cycles - 1;
    match (
        value_at(cycles, values, curr_cycle - 1),
        value_at(cycles, values, curr_cycle),
    ) {
        (Some(prev), Some(curr)) => policy.delta(prev, curr).unwrap_or(0),
        _ => 0,
    }
}
