//! Source abstraction and poll driver for counter snapshots.
//!
//! `MetricsSource` lets the poll driver work against the HTTP [`Client`] or a
//! test double through the same interface. [`poll_once`] is one
//! fetch-then-append cycle; [`Poller`] repeats it on a fixed period on a
//! background thread.

mod poller;

pub use poller::{Poller, PollerConfig};

use std::time::Duration;

use tracing::debug;

use crate::client::{BuildInfo, Client, Endpoint, FetchError, Metrics, Uptime};
use crate::storage::SharedSeriesStore;

/// Abstraction over where snapshots come from.
///
/// The trait is object-safe and designed to be used with
/// `Box<dyn MetricsSource>`. Every call must give up after `timeout`.
pub trait MetricsSource: Send {
    fn build_info(&self, timeout: Duration) -> Result<BuildInfo, FetchError>;

    fn uptime(&self, timeout: Duration) -> Result<Uptime, FetchError>;

    fn metrics(&self, timeout: Duration) -> Result<Metrics, FetchError>;
}

impl MetricsSource for Client {
    fn build_info(&self, timeout: Duration) -> Result<BuildInfo, FetchError> {
        self.get(Endpoint::BuildInfo, timeout)
    }

    fn uptime(&self, timeout: Duration) -> Result<Uptime, FetchError> {
        self.get(Endpoint::Uptime, timeout)
    }

    fn metrics(&self, timeout: Duration) -> Result<Metrics, FetchError> {
        self.get(Endpoint::Metrics, timeout)
    }
}

/// Outcome reported by the poll driver to whoever renders.
#[derive(Debug)]
pub enum PollEvent {
    /// Build info was fetched (once per poller).
    BuildInfo(BuildInfo),
    /// Uptime was fetched.
    Uptime(Uptime),
    /// A metrics snapshot was appended as cycle `cycles - 1`.
    Appended {
        cycles: u64,
        inputs: usize,
        outputs: usize,
    },
    /// A fetch failed; nothing was appended for it.
    Failed(FetchError),
}

/// Fetches one metrics snapshot and appends it to `store`.
///
/// The fetch runs before the store lock is taken and gives up after
/// `timeout`. On failure nothing is appended and the error is returned
/// unchanged.
pub fn poll_once(
    source: &dyn MetricsSource,
    store: &SharedSeriesStore,
    timeout: Duration,
) -> Result<PollEvent, FetchError> {
    let metrics = source.metrics(timeout)?;
    let inputs = metrics.input.len();
    let outputs = metrics.output.len();
    let cycles = store.append(&metrics);
    debug!(cycles, inputs, outputs, "snapshot appended");
    Ok(PollEvent::Appended {
        cycles,
        inputs,
        outputs,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSource;
    use super::*;
    use crate::client::MetricInput;

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn metrics(records: u64) -> Metrics {
        let mut m = Metrics::default();
        m.input
            .insert("cpu.0".to_string(), MetricInput { records, bytes: 0 });
        m
    }

    #[test]
    fn test_poll_once_appends_on_success() {
        let source = ScriptedSource::with_metrics(vec![Ok(metrics(1)), Ok(metrics(4))]);
        let store = SharedSeriesStore::new();

        poll_once(&source, &store, TIMEOUT).unwrap();
        let event = poll_once(&source, &store, TIMEOUT).unwrap();
        assert!(matches!(
            event,
            PollEvent::Appended {
                cycles: 2,
                inputs: 1,
                outputs: 0
            }
        ));
        store.read(|s| assert_eq!(s.input("cpu.0").unwrap().records(), &[1, 4]));
    }

    #[test]
    fn test_poll_once_failure_leaves_store_untouched() {
        let source = ScriptedSource::with_metrics(vec![Err(FetchError::Status {
            path: "/api/v1/metrics",
            code: 500,
        })]);
        let store = SharedSeriesStore::new();

        let err = poll_once(&source, &store, TIMEOUT).unwrap_err();
        assert!(matches!(err, FetchError::Status { code: 500, .. }));
        store.read(|s| {
            assert_eq!(s.cycles(), 0);
            assert!(s.is_empty());
        });
    }

    #[test]
    fn test_poll_once_against_failing_server() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/v1/metrics")
            .with_status(500)
            .create();
        let client = Client::new(&server.url(), TIMEOUT).unwrap();
        let store = SharedSeriesStore::new();

        let err = poll_once(&client, &store, TIMEOUT).unwrap_err();
        assert!(matches!(err, FetchError::Status { code: 500, .. }));
        assert!(!matches!(err, FetchError::Transport { .. }));
        store.read(|s| assert_eq!(s.cycles(), 0));
    }
}
