//! Payloads returned by the Fluent Bit monitoring API.
//!
//! Field names follow the JSON documents served by the agent. Counter maps
//! are keyed by the source name (`"<plugin>.<id>"`), which is kept opaque.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Payload of `GET /`.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct BuildInfo {
    #[serde(rename = "fluent-bit")]
    pub fluent_bit: FluentBitInfo,
}

/// The `fluent-bit` object of [`BuildInfo`].
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct FluentBitInfo {
    pub version: String,
    pub edition: String,
    #[serde(default)]
    pub flags: Vec<String>,
}

/// Payload of `GET /api/v1/uptime`.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Uptime {
    pub uptime_sec: u64,
    /// Human readable representation of the uptime.
    pub uptime_hr: String,
}

/// Payload of `GET /api/v1/metrics`: one snapshot of every counter.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    #[serde(default)]
    pub input: HashMap<String, MetricInput>,
    #[serde(default)]
    pub output: HashMap<String, MetricOutput>,
}

/// Counters of one input plugin instance.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct MetricInput {
    pub records: u64,
    pub bytes: u64,
}

/// Counters of one output plugin instance.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct MetricOutput {
    pub proc_records: u64,
    pub proc_bytes: u64,
    pub errors: u64,
    pub retries: u64,
    pub retries_failed: u64,
}
