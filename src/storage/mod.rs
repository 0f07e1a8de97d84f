//! Counter history kept for the lifetime of the process.
//!
//! Nothing is persisted and nothing is evicted; memory grows with the number
//! of poll cycles and known sources.

mod series;
mod store;

pub use series::{CounterSeries, InputRates, InputSeries, OutputRates, OutputSeries};
pub use store::{Namespace, SeriesStore, SharedSeriesStore};
