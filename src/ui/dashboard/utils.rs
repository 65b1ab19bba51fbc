//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use ratatui::prelude::Color;

/// Get a ratatui color for an event source
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Wallet => Color::Cyan,
        Source::Marketplace => Color::Yellow,
        Source::Metadata => Color::Magenta,
        Source::Loader => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // "YYYY-MM-DD HH:MM:SS" -> "MM-DD HH:MM"
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("error sending request") || msg.contains("ConnectTimeout") {
        return "Network error: could not reach endpoint".to_string();
    }
    if msg.contains("operation timed out") {
        return "Request timed out".to_string();
    }
    msg.to_string()
}

/// Shorten a hex address to `0x1234…abcd` for narrow panels.
pub fn short_address(address: &str) -> String {
    if address.len() <= 14 {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_full_timestamp() {
        assert_eq!(format_compact_timestamp("2026-10-18 09:41:07"), "10-18 09:41");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn shortens_long_addresses() {
        assert_eq!(
            short_address("0x0101010101010101010101010101010101010101"),
            "0x0101…0101"
        );
        assert_eq!(short_address("0x01"), "0x01");
    }

    #[test]
    fn cleans_transport_errors() {
        assert_eq!(
            clean_http_error_message("error sending request for url (http://x)"),
            "Network error: could not reach endpoint"
        );
        assert_eq!(clean_http_error_message("plain"), "plain");
    }
}
