//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::client::Client;
use crate::provider::{Poller, PollerConfig};
use crate::storage::SharedSeriesStore;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::{FrameData, render};
use super::state::AppState;

/// Redraw period while no other event arrives.
const TICK_RATE: Duration = Duration::from_millis(500);

/// Main TUI application.
pub struct App {
    state: AppState,
    store: SharedSeriesStore,
    poller: Option<Poller>,
    autostart: bool,
    should_quit: bool,
}

impl App {
    /// Creates an app with the prompts prefilled with `address` and `interval`.
    ///
    /// With `autostart` both values are submitted right away; a rejected value
    /// leaves its prompt open with the error shown.
    pub fn new(address: String, interval: String, autostart: bool) -> Self {
        Self {
            state: AppState::new(address, interval),
            store: SharedSeriesStore::new(),
            poller: None,
            autostart,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore terminal even if the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        // The thread exits at its next wait; an in-flight request is bounded
        // by its deadline, so quitting does not wait for it.
        drop(self.poller.take());

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let events = EventHandler::new(TICK_RATE);

        if self.autostart && self.state.submit_address() && self.state.submit_interval() {
            self.start_polling(&events)?;
        }

        loop {
            // One store read per frame; the lock is released before drawing.
            let data = self.store.read(|store| FrameData::build(store, &self.state));
            self.state.sync_selection(&data.sources);
            terminal.draw(|frame| render(frame, &self.state, &data))?;

            match events.next() {
                Ok(Event::Tick) | Ok(Event::Resize(..)) => {}
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::StartPolling => self.start_polling(&events)?,
                    KeyAction::None => {}
                },
                Ok(Event::Poll(event)) => self.state.apply_poll_event(event),
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Builds the client for the accepted origin and spawns the poller.
    fn start_polling(&mut self, events: &EventHandler) -> io::Result<()> {
        let (Some(origin), Some(interval)) = (self.state.origin.clone(), self.state.interval)
        else {
            return Ok(());
        };

        let config = PollerConfig::new(interval);
        let client = match Client::new(origin.as_str(), config.deadline()) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "cannot create client");
                self.state.reject_address(e.to_string());
                return Ok(());
            }
        };
        info!(origin = %client.base_url(), interval = ?interval, "starting poller");

        let tx = events.sender();
        let poller = Poller::spawn(client, self.store.clone(), config, move |event| {
            tx.send(Event::Poll(event)).is_ok()
        })?;
        self.poller = Some(poller);
        Ok(())
    }
}
