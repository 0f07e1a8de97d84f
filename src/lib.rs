//! fbtop - live terminal dashboard for the Fluent Bit monitoring API.
//!
//! The library polls an agent's HTTP endpoints on a fixed period, keeps the
//! full history of every input and output counter, and derives per-interval
//! deltas from it for display:
//! - [`client`] fetches and decodes the endpoints,
//! - [`storage`] keeps the counter series,
//! - [`rates`] turns cumulative counters into deltas,
//! - [`provider`] drives the poll cycle,
//! - [`view`] and [`tui`] present the result.

pub mod client;
pub mod fmt;
pub mod provider;
pub mod rates;
pub mod storage;
pub mod tui;
pub mod util;
pub mod view;
