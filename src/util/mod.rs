//! Utility modules for fbtop.

mod config;

pub use config::{ConfigError, MAX_INTERVAL_SECS, parse_interval, parse_origin};
