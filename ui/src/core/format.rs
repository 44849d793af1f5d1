//! Formatting helpers for list and report views.

use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};

/// Compact play counter: `9,999` below ten thousand, `1.2万` above.
pub fn format_play_count(count: u64) -> String {
    if count >= 10_000 {
        let tenths = (count as f64 / 1_000.0).round() / 10.0;
        if tenths.fract() == 0.0 {
            format!("{}万", tenths as u64)
        } else {
            format!("{tenths:.1}万")
        }
    } else if count >= 1_000 {
        format!("{},{:03}", count / 1_000, count % 1_000)
    } else {
        count.to_string()
    }
}

/// `YYYY-MM-DD` from an RFC 3339 timestamp; the raw string when unparsable.
pub fn format_date(raw: &str) -> String {
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|ts| ts.format(&format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_counts() {
        assert_eq!(format_play_count(0), "0");
        assert_eq!(format_play_count(1_234), "1,234");
        assert_eq!(format_play_count(12_000), "1.2万");
        assert_eq!(format_play_count(30_000), "3万");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date("2025-03-09T08:15:00Z"), "2025-03-09");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
