//! Formatting helpers shared by view models.
//!
//! All functions are pure: no ratatui styles, no layout.

/// Format a byte count as human-readable size.
///
/// `"1.5G"`, `"100.3M"`, `"50.0K"`, `"512B"`
pub fn format_bytes(bytes: u64) -> String {
    let f = bytes as f64;
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1}G", f / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1}M", f / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1}K", f / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a plain counter with SI suffixes above ten thousand.
///
/// `"9999"`, `"12.3K"`, `"4.0M"`, `"1.2G"`
pub fn format_count(count: u64) -> String {
    let f = count as f64;
    if count >= 1_000_000_000 {
        format!("{:.1}G", f / 1_000_000_000.0)
    } else if count >= 1_000_000 {
        format!("{:.1}M", f / 1_000_000.0)
    } else if count >= 10_000 {
        format!("{:.1}K", f / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Format a counter field for a table cell; `*bytes` fields get byte units.
pub fn format_counter(field: &str, value: u64) -> String {
    if field.ends_with("bytes") {
        format_bytes(value)
    } else {
        format_count(value)
    }
}

/// Format duration in seconds as compact human-readable text.
///
/// `"45s"`, `"3m5s"`, `"2h10m"`, `"4d3h"`
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d{}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(2048), "2.0K");
        assert_eq!(format_bytes(5 * 1024 * 1024 + 300 * 1024), "5.3M");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0G");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(9_999), "9999");
        assert_eq!(format_count(12_345), "12.3K");
        assert_eq!(format_count(4_000_000), "4.0M");
        assert_eq!(format_count(1_200_000_000), "1.2G");
    }

    #[test]
    fn test_format_counter_picks_units() {
        assert_eq!(format_counter("proc_bytes", 2048), "2.0K");
        assert_eq!(format_counter("records", 2048), "2048");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(185), "3m5s");
        assert_eq!(format_duration(7800), "2h10m");
        assert_eq!(format_duration(97200), "1d3h");
    }
}
