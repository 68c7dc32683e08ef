//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use crate::status::ServiceStatus;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Color;

/// Get a ratatui color for an event based on where it came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Gateway => Color::Magenta,
        Source::Relay => Color::Cyan,
        Source::Dashboard => Color::Yellow,
    }
}

pub fn status_color(status: &ServiceStatus) -> Color {
    if status.up {
        Color::LightGreen
    } else {
        Color::LightRed
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

/// Shorten transport errors, which reqwest renders verbosely
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("error sending request") && msg.contains("timed out") {
        return msg
            .split("error sending request")
            .next()
            .map(|head| format!("{}request timed out", head))
            .unwrap_or_else(|| msg.to_string());
    }
    if msg.contains("error sending request") {
        return msg
            .split("error sending request")
            .next()
            .map(|head| format!("{}connection failed", head))
            .unwrap_or_else(|| msg.to_string());
    }
    msg.to_string()
}

/// Centered rectangle for popups, sized in percent of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp() {
        assert_eq!(format_compact_timestamp("2024-05-06 13:45:10"), "05-06 13:45");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn transport_errors_are_shortened() {
        let msg = "Load guild: Network error: error sending request for url (http://x/health)";
        assert_eq!(
            clean_http_error_message(msg),
            "Load guild: Network error: connection failed"
        );
        assert_eq!(clean_http_error_message("plain"), "plain");
    }
}
