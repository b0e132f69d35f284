//! Terminal helpers for the client.

use std::io::Write;

const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Terminal width in columns, from `COLUMNS` or 80 when unknown.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|width| *width > 0)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// Move the cursor up one line and erase it, hiding the echoed input line.
pub fn clear_previous_line(out: &mut impl Write) {
    let _ = write!(out, "\x1b[F\x1b[K");
}
