//! Background poll loop.
//!
//! One thread runs fetch-then-append cycles on a fixed period. A failed
//! cycle is reported and the next one is scheduled regardless; the loop only
//! ends when the [`Poller`] is stopped or dropped, or when the event
//! receiver goes away.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::storage::SharedSeriesStore;

use super::{MetricsSource, PollEvent, poll_once};

/// Extra time granted to a cycle on top of the poll interval.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(1);

/// Timing of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Period between the starts of two cycles.
    pub interval: Duration,
    /// Added to `interval` to form the cycle deadline.
    pub grace: Duration,
}

impl PollerConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            grace: DEFAULT_GRACE,
        }
    }

    /// Upper bound for a whole cycle, and for any single request in it.
    pub fn deadline(&self) -> Duration {
        self.interval.saturating_add(self.grace)
    }
}

/// Time left in one poll cycle.
#[derive(Debug, Clone, Copy)]
struct CycleBudget {
    started: Instant,
    budget: Duration,
}

impl CycleBudget {
    fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// `None` once the budget is used up.
    fn remaining(&self) -> Option<Duration> {
        self.budget
            .checked_sub(self.started.elapsed())
            .filter(|left| !left.is_zero())
    }
}

/// Handle to the poll thread.
///
/// Dropping the handle signals the thread to stop at its next wait without
/// blocking; [`Poller::stop`] additionally waits for it to exit.
pub struct Poller {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Starts polling `source` into `store`.
    ///
    /// `notify` receives every [`PollEvent`]; returning `false` ends the loop.
    pub fn spawn<S, F>(
        source: S,
        store: SharedSeriesStore,
        config: PollerConfig,
        mut notify: F,
    ) -> io::Result<Self>
    where
        S: MetricsSource + 'static,
        F: FnMut(PollEvent) -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("fbtop-poller".to_string())
            .spawn(move || {
                info!(
                    interval = ?config.interval,
                    deadline = ?config.deadline(),
                    "poller started"
                );
                let mut build_info_loaded = false;

                loop {
                    let started = Instant::now();
                    let keep_going = run_cycle(
                        &source,
                        &store,
                        &config,
                        &mut build_info_loaded,
                        &mut notify,
                    );
                    if !keep_going {
                        debug!("event receiver closed");
                        break;
                    }

                    // Cycles start one interval apart; an overrun starts the
                    // next one right away.
                    let wait = config.interval.saturating_sub(started.elapsed());
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                info!("poller stopped");
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stops the loop and waits for the thread to exit.
    ///
    /// An in-flight cycle is bounded by its deadline.
    pub fn stop(mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("poller thread panicked");
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop_tx.take();
    }
}

/// Runs one cycle. Returns `false` once the event receiver is gone.
///
/// The metrics fetch gets the whole cycle deadline. Build info (until it
/// loads once) and uptime share what is left of it and are skipped when
/// nothing is left.
fn run_cycle<S, F>(
    source: &S,
    store: &SharedSeriesStore,
    config: &PollerConfig,
    build_info_loaded: &mut bool,
    notify: &mut F,
) -> bool
where
    S: MetricsSource,
    F: FnMut(PollEvent) -> bool,
{
    let budget = CycleBudget::start(config.deadline());

    let event = match poll_once(source, store, config.deadline()) {
        Ok(event) => event,
        Err(e) => {
            if e.is_timeout() {
                warn!(error = %e, "metrics fetch timed out");
            } else {
                warn!(error = %e, "metrics fetch failed");
            }
            PollEvent::Failed(e)
        }
    };
    if !notify(event) {
        return false;
    }

    if !*build_info_loaded {
        let Some(timeout) = budget.remaining() else {
            debug!("cycle deadline reached, build info skipped");
            return true;
        };
        let event = match source.build_info(timeout) {
            Ok(info) => {
                info!(
                    version = %info.fluent_bit.version,
                    edition = %info.fluent_bit.edition,
                    "build info loaded"
                );
                *build_info_loaded = true;
                PollEvent::BuildInfo(info)
            }
            Err(e) => {
                warn!(error = %e, "build info fetch failed");
                PollEvent::Failed(e)
            }
        };
        if !notify(event) {
            return false;
        }
    }

    let Some(timeout) = budget.remaining() else {
        debug!("cycle deadline reached, uptime skipped");
        return true;
    };
    match source.uptime(timeout) {
        Ok(uptime) => notify(PollEvent::Uptime(uptime)),
        Err(e) => {
            debug!(error = %e, "uptime fetch failed");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BuildInfo, FetchError, MetricOutput, Metrics};
    use crate::provider::testing::ScriptedSource;

    fn metrics(proc_records: u64) -> Metrics {
        let mut m = Metrics::default();
        m.output.insert(
            "stdout.0".to_string(),
            MetricOutput {
                proc_records,
                ..MetricOutput::default()
            },
        );
        m
    }

    #[test]
    fn test_config_deadline() {
        let config = PollerConfig::new(Duration::from_secs(5));
        assert_eq!(config.deadline(), Duration::from_secs(6));
    }

    #[test]
    fn test_poller_keeps_polling_after_failures() {
        let mut source = ScriptedSource::with_metrics(vec![
            Err(FetchError::Status {
                path: "/api/v1/metrics",
                code: 500,
            }),
            Ok(metrics(1)),
            Ok(metrics(3)),
        ]);
        source.build_info = Some(BuildInfo::default());

        let store = SharedSeriesStore::new();
        let (tx, rx) = mpsc::channel();
        let poller = Poller::spawn(
            source,
            store.clone(),
            PollerConfig::new(Duration::from_millis(5)),
            move |event| tx.send(event).is_ok(),
        )
        .unwrap();

        let mut appended = 0;
        let mut failed = 0;
        let mut build_info = 0;
        while appended < 2 {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                PollEvent::Appended { .. } => appended += 1,
                PollEvent::Failed(_) => failed += 1,
                PollEvent::BuildInfo(_) => build_info += 1,
                PollEvent::Uptime(_) => {}
            }
        }
        poller.stop();

        assert_eq!(build_info, 1);
        assert!(failed >= 1);
        store.read(|s| {
            assert_eq!(s.output("stdout.0").unwrap().proc_records(), &[1, 3]);
        });
    }

    #[test]
    fn test_poller_stops_when_receiver_dropped() {
        let source = ScriptedSource::with_metrics(vec![Ok(metrics(1))]);
        let poller = Poller::spawn(
            source,
            SharedSeriesStore::new(),
            PollerConfig::new(Duration::from_millis(5)),
            |_| false,
        )
        .unwrap();
        // Returns because the loop ends on its own.
        poller.stop();
    }

    #[test]
    fn test_poller_stop_interrupts_wait() {
        let source = ScriptedSource::with_metrics(vec![Ok(metrics(1))]);
        let poller = Poller::spawn(
            source,
            SharedSeriesStore::new(),
            PollerConfig::new(Duration::from_secs(3600)),
            |_| true,
        )
        .unwrap();

        let started = Instant::now();
        poller.stop();
        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn test_config_deadline_saturates() {
        let config = PollerConfig::new(Duration::MAX);
        assert_eq!(config.deadline(), Duration::MAX);
    }

    #[test]
    fn test_poller_with_huge_interval_stops() {
        let source = ScriptedSource::with_metrics(vec![Ok(metrics(1))]);
        let (tx, rx) = mpsc::channel();
        let poller = Poller::spawn(
            source,
            SharedSeriesStore::new(),
            PollerConfig::new(Duration::MAX),
            move |event| tx.send(event).is_ok(),
        )
        .unwrap();

        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            PollEvent::Appended { cycles: 1, .. }
        ));
        poller.stop();
    }

    #[test]
    fn test_slow_metrics_use_up_the_cycle() {
        let mut source = ScriptedSource::with_metrics(vec![Ok(metrics(1))]);
        source.metrics_delay = Duration::from_millis(100);

        let config = PollerConfig {
            interval: Duration::from_millis(40),
            grace: Duration::from_millis(10),
        };
        let store = SharedSeriesStore::new();
        let mut loaded = false;
        let mut events = Vec::new();
        let keep_going = run_cycle(&source, &store, &config, &mut loaded, &mut |event| {
            events.push(event);
            true
        });

        assert!(keep_going);
        assert!(!loaded);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], PollEvent::Appended { cycles: 1, .. }));
        // Build info and uptime were skipped: nothing was left of the cycle.
        let calls = source.calls.lock().unwrap();
        assert_eq!(*calls, vec![("metrics", Duration::from_millis(50))]);
    }

    #[test]
    fn test_secondary_fetches_share_the_cycle_deadline() {
        let mut source = ScriptedSource::with_metrics(vec![Ok(metrics(1))]);
        source.build_info = Some(BuildInfo::default());
        let config = PollerConfig::new(Duration::from_secs(5));

        let mut loaded = false;
        run_cycle(
            &source,
            &SharedSeriesStore::new(),
            &config,
            &mut loaded,
            &mut |_| true,
        );

        assert!(loaded);
        let calls = source.calls.lock().unwrap();
        let names: Vec<&str> = calls.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["metrics", "build_info", "uptime"]);
        assert_eq!(calls[0].1, config.deadline());
        assert!(calls[1].1 <= config.deadline());
        assert!(calls[2].1 <= calls[1].1);
    }

    #[test]
    fn test_unanswered_agent_reports_timeout() {
        // Completes the TCP handshake but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let config = PollerConfig {
            interval: Duration::from_millis(200),
            grace: Duration::from_millis(100),
        };
        let client = crate::client::Client::new(&origin, config.deadline()).unwrap();

        let store = SharedSeriesStore::new();
        let (tx, rx) = mpsc::channel();
        let poller = Poller::spawn(client, store.clone(), config, move |event| {
            tx.send(event).is_ok()
        })
        .unwrap();

        match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            PollEvent::Failed(e) => {
                assert!(matches!(e, FetchError::Transport { .. }));
                assert!(e.is_timeout());
            }
            other => panic!("expected a timed out fetch, got {other:?}"),
        }
        drop(poller);
        store.read(|s| assert_eq!(s.cycles(), 0));
    }
}
