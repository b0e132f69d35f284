//! Message formatting utilities for client display.

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a message typed by this user, right-aligned to `width` columns.
    ///
    /// Text wider than the terminal is left as is.
    pub fn format_own(text: &str, width: usize) -> String {
        let message = format!("You: {}", text.trim());
        format!("{:>width$}", message, width = width)
    }

    /// Format a line received from the server, left-aligned.
    pub fn format_incoming(line: &str) -> String {
        line.trim_end().to_string()
    }

    /// Format the banner shown once connected
    pub fn format_connected(addr: &str, name: Option<&str>) -> String {
        match name {
            Some(name) => format!("Connected to {} as '{}'. Type messages and press Enter.", addr, name),
            None => format!("Connected to {}. Enter your display name:", addr),
        }
    }
}
