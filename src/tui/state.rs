//! Application state management.

use std::time::Duration;

use reqwest::Url;

use crate::client::{BuildInfo, Uptime};
use crate::provider::PollEvent;
use crate::util::{parse_interval, parse_origin};
use crate::view::detail::PlotMode;
use crate::view::sources::{SourceRef, SourcesView};

/// Default value of the address prompt.
pub const DEFAULT_ADDRESS: &str = "http://localhost:2020";
/// Default value of the interval prompt, in seconds.
pub const DEFAULT_INTERVAL: &str = "5";

/// Screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Asking for the monitoring endpoint origin.
    #[default]
    ConfiguringAddress,
    /// Asking for the poll interval.
    ConfiguringInterval,
    /// Input and output tables.
    Listing,
    /// Charts of the selected source.
    Detail,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    /// No popup is open.
    #[default]
    None,
    /// Quit confirmation dialog.
    QuitConfirm,
}

impl PopupState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Main application state.
#[derive(Debug, Default)]
pub struct AppState {
    pub screen: Screen,
    pub popup: PopupState,

    /// Text typed at the address prompt.
    pub address_input: String,
    /// Text typed at the interval prompt.
    pub interval_input: String,
    /// Validation error of the last prompt submission.
    pub input_error: Option<String>,

    /// Accepted origin, set once the address prompt is submitted.
    pub origin: Option<Url>,
    /// Accepted poll interval.
    pub interval: Option<Duration>,

    /// Index into the combined input/output selection space.
    pub selected: usize,
    /// Number of selectable rows at the last refresh.
    pub selectable: usize,
    /// Source at `selected` at the last refresh.
    pub selected_source: Option<SourceRef>,
    /// Source shown on the detail screen.
    pub detail: Option<SourceRef>,
    pub plot_mode: PlotMode,

    pub build_info: Option<BuildInfo>,
    pub uptime: Option<Uptime>,
    /// Successful cycles so far.
    pub cycles: u64,
    /// Most recent fetch error; cleared by the next appended snapshot.
    pub last_error: Option<String>,
}

impl AppState {
    /// Creates the state with both prompts prefilled.
    pub fn new(address: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            address_input: address.into(),
            interval_input: interval.into(),
            ..Self::default()
        }
    }

    /// Validates the address prompt. On success moves to the interval prompt.
    pub fn submit_address(&mut self) -> bool {
        match parse_origin(&self.address_input) {
            Ok(origin) => {
                self.origin = Some(origin);
                self.input_error = None;
                self.screen = Screen::ConfiguringInterval;
                true
            }
            Err(e) => {
                self.input_error = Some(e.to_string());
                false
            }
        }
    }

    /// Validates the interval prompt. On success moves to the listing.
    pub fn submit_interval(&mut self) -> bool {
        match parse_interval(&self.interval_input) {
            Ok(interval) => {
                self.interval = Some(interval);
                self.input_error = None;
                self.screen = Screen::Listing;
                true
            }
            Err(e) => {
                self.input_error = Some(e.to_string());
                false
            }
        }
    }

    /// Returns to the address prompt with `error` shown under it.
    pub fn reject_address(&mut self, error: String) {
        self.origin = None;
        self.interval = None;
        self.input_error = Some(error);
        self.screen = Screen::ConfiguringAddress;
    }

    /// Text of the prompt currently being edited, if any.
    pub fn prompt_input_mut(&mut self) -> Option<&mut String> {
        match self.screen {
            Screen::ConfiguringAddress => Some(&mut self.address_input),
            Screen::ConfiguringInterval => Some(&mut self.interval_input),
            Screen::Listing | Screen::Detail => None,
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.selectable {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Opens the detail screen of the selected source, if there is one.
    pub fn open_detail(&mut self) {
        if let Some(source) = self.selected_source.clone() {
            self.detail = Some(source);
            self.screen = Screen::Detail;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.screen = Screen::Listing;
    }

    /// Takes selection bounds from a freshly built listing.
    pub fn sync_selection(&mut self, view: &SourcesView) {
        self.selectable = view.selectable;
        if self.selected >= self.selectable {
            self.selected = self.selectable.saturating_sub(1);
        }
        self.selected_source = view.selected.clone();
    }

    /// Applies an event reported by the poller.
    pub fn apply_poll_event(&mut self, event: PollEvent) {
        match event {
            PollEvent::BuildInfo(info) => self.build_info = Some(info),
            PollEvent::Uptime(uptime) => self.uptime = Some(uptime),
            PollEvent::Appended { cycles, .. } => {
                self.cycles = cycles;
                self.last_error = None;
            }
            PollEvent::Failed(e) => self.last_error = Some(e.to_string()),
        }
    }
}
