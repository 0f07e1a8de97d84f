//! Parsers for the two values the user configures before polling starts.
//!
//! - Target origin: `http://host[:port]` or `https://host[:port]`, no path,
//!   query or fragment. A single trailing `/` is accepted.
//! - Poll interval: a positive whole number of seconds.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Error type for rejected configuration input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid URL '{input}': {message}")]
    InvalidOrigin { input: String, message: String },

    #[error(
        "invalid pull interval '{input}': expected a whole number of seconds between 1 and {max}",
        max = MAX_INTERVAL_SECS
    )]
    InvalidInterval { input: String },
}

/// Parse a monitoring endpoint origin.
///
/// # Examples
///
/// ```
/// use fbtop::util::parse_origin;
///
/// let url = parse_origin("http://localhost:2020/").unwrap();
/// assert_eq!(url.as_str(), "http://localhost:2020/");
/// assert!(parse_origin("localhost:2020").is_err());
/// ```
pub fn parse_origin(input: &str) -> Result<Url, ConfigError> {
    let input = input.trim();
    let invalid = |message: &str| ConfigError::InvalidOrigin {
        input: input.to_string(),
        message: message.to_string(),
    };

    let url = Url::parse(input).map_err(|e| invalid(&e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }
    if url.path() != "/" {
        return Err(invalid("must not contain a path"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("must not contain credentials"));
    }

    Ok(url)
}

/// Longest accepted poll interval (one day).
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Parse a poll interval given in whole seconds, `1..=MAX_INTERVAL_SECS`.
pub fn parse_interval(input: &str) -> Result<Duration, ConfigError> {
    let trimmed = input.trim();
    match trimmed.parse::<u64>() {
        Ok(secs) if (1..=MAX_INTERVAL_SECS).contains(&secs) => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidInterval {
            input: trimmed.to_string(),
        }),
    }
}
