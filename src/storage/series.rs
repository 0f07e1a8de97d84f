//! Per-source counter series stored as struct-of-arrays.
//!
//! Every series keeps one `Vec<u64>` per counter field plus a `cycles`
//! vector with the store cycle of each observation. All vectors of a series
//! grow in lock-step, so index `i` across them always refers to the same
//! poll cycle.

use crate::client::{MetricInput, MetricOutput};
use crate::rates::{ResetPolicy, windowed};

/// Common read access to a counter series, used by rate derivation and views.
pub trait CounterSeries {
    /// Counter record appended on each observation.
    type Record;

    /// Field names in display order; `field(i)` returns `FIELD_NAMES[i]`.
    const FIELD_NAMES: &'static [&'static str];

    /// Appends one observation taken at store cycle `cycle`.
    fn push(&mut self, cycle: u64, record: &Self::Record);

    /// Store cycle of every observation, ascending.
    fn cycles(&self) -> &[u64];

    /// Values of the field at `index`.
    ///
    /// # Panics
    /// Panics if `index >= FIELD_NAMES.len()`.
    fn field(&self, index: usize) -> &[u64];

    /// Number of observations.
    fn len(&self) -> usize {
        self.cycles().len()
    }

    fn is_empty(&self) -> bool {
        self.cycles().is_empty()
    }

    /// Most recent value of every field, `None` if nothing was observed yet.
    fn latest_values(&self) -> Option<Vec<u64>> {
        let last = self.len().checked_sub(1)?;
        Some(
            (0..Self::FIELD_NAMES.len())
                .map(|i| self.field(i)[last])
                .collect(),
        )
    }
}

/// History of one input plugin instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSeries {
    cycles: Vec<u64>,
    records: Vec<u64>,
    bytes: Vec<u64>,
}

impl InputSeries {
    pub const RECORDS: usize = 0;
    pub const BYTES: usize = 1;

    /// Creates a series seeded with a single observation.
    pub fn seeded(cycle: u64, record: &MetricInput) -> Self {
        let mut series = Self::default();
        series.push(cycle, record);
        series
    }

    /// Most recent counters, `None` if nothing was observed yet.
    pub fn latest(&self) -> Option<MetricInput> {
        Some(MetricInput {
            records: *self.records.last()?,
            bytes: *self.bytes.last()?,
        })
    }

    pub fn records(&self) -> &[u64] {
        &self.records
    }

    pub fn bytes(&self) -> &[u64] {
        &self.bytes
    }

    /// Converts the counters into per-interval rates, dropping reset pairs.
    pub fn instant_rates(&self) -> InputRates {
        InputRates {
            records: windowed(&self.records, ResetPolicy::Drop),
            bytes: windowed(&self.bytes, ResetPolicy::Drop),
        }
    }
}

impl CounterSeries for InputSeries {
    type Record = MetricInput;

    const FIELD_NAMES: &'static [&'static str] = &["records", "bytes"];

    fn push(&mut self, cycle: u64, record: &MetricInput) {
        self.cycles.push(cycle);
        self.records.push(record.records);
        self.bytes.push(record.bytes);
    }

    fn cycles(&self) -> &[u64] {
        &self.cycles
    }

    fn field(&self, index: usize) -> &[u64] {
        match index {
            Self::RECORDS => &self.records,
            Self::BYTES => &self.bytes,
            _ => panic!("input series has no field {index}"),
        }
    }
}

/// Derived rates of an [`InputSeries`]. Field lengths may differ after resets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRates {
    pub records: Vec<u64>,
    pub bytes: Vec<u64>,
}

/// History of one output plugin instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSeries {
    cycles: Vec<u64>,
    proc_records: Vec<u64>,
    proc_bytes: Vec<u64>,
    errors: Vec<u64>,
    retries: Vec<u64>,
    retries_failed: Vec<u64>,
}

impl OutputSeries {
    pub const PROC_RECORDS: usize = 0;
    pub const PROC_BYTES: usize = 1;
    pub const ERRORS: usize = 2;
    pub const RETRIES: usize = 3;
    pub const RETRIES_FAILED: usize = 4;

    /// Creates a series seeded with a single observation.
    pub fn seeded(cycle: u64, record: &MetricOutput) -> Self {
        let mut series = Self::default();
        series.push(cycle, record);
        series
    }

    /// Most recent counters, `None` if nothing was observed yet.
    pub fn latest(&self) -> Option<MetricOutput> {
        Some(MetricOutput {
            proc_records: *self.proc_records.last()?,
            proc_bytes: *self.proc_bytes.last()?,
            errors: *self.errors.last()?,
            retries: *self.retries.last()?,
            retries_failed: *self.retries_failed.last()?,
        })
    }

    pub fn proc_records(&self) -> &[u64] {
        &self.proc_records
    }

    pub fn proc_bytes(&self) -> &[u64] {
        &self.proc_bytes
    }

    pub fn errors(&self) -> &[u64] {
        &self.errors
    }

    pub fn retries(&self) -> &[u64] {
        &self.retries
    }

    pub fn retries_failed(&self) -> &[u64] {
        &self.retries_failed
    }

    /// Converts the counters into per-interval rates, dropping reset pairs.
    pub fn instant_rates(&self) -> OutputRates {
        OutputRates {
            proc_records: windowed(&self.proc_records, ResetPolicy::Drop),
            proc_bytes: windowed(&self.proc_bytes, ResetPolicy::Drop),
            errors: windowed(&self.errors, ResetPolicy::Drop),
            retries: windowed(&self.retries, ResetPolicy::Drop),
            retries_failed: windowed(&self.retries_failed, ResetPolicy::Drop),
        }
    }
}

impl CounterSeries for OutputSeries {
    type Record = MetricOutput;

    const FIELD_NAMES: &'static [&'static str] = &[
        "proc_records",
        "proc_bytes",
        "errors",
        "retries",
        "retries_failed",
    ];

    fn push(&mut self, cycle: u64, record: &MetricOutput) {
        self.cycles.push(cycle);
        self.proc_records.push(record.proc_records);
        self.proc_bytes.push(record.proc_bytes);
        self.errors.push(record.errors);
        self.retries.push(record.retries);
        self.retries_failed.push(record.retries_failed);
    }

    fn cycles(&self) -> &[u64] {
        &self.cycles
    }

    fn field(&self, index: usize) -> &[u64] {
        match index {
            Self::PROC_RECORDS => &self.proc_records,
            Self::PROC_BYTES => &self.proc_bytes,
            Self::ERRORS => &self.errors,
            Self::RETRIES => &self.retries,
            Self::RETRIES_FAILED => &self.retries_failed,
            _ => panic!("output series has no field {index}"),
        }
    }
}

/// Derived rates of an [`OutputSeries`]. Field lengths may differ after resets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRates {
    pub proc_records: Vec<u64>,
    pub proc_bytes: Vec<u64>,
    pub errors: Vec<u64>,
    pub retries: Vec<u64>,
    pub retries_failed: Vec<u64>,
}
