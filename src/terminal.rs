//! Terminal helpers: width detection and the buffered output writer.

use crossterm::terminal;
use std::io::{self, Stdout};

/// Width used when neither `COLUMNS` nor the terminal reports one.
pub const DEFAULT_WIDTH: usize = 80;

/// Get the current terminal size, falling back to (80, 24) if unavailable.
pub fn terminal_size() -> (u16, u16) {
    terminal::size().unwrap_or((DEFAULT_WIDTH as u16, 24))
}

/// Width for column layout. A positive `COLUMNS` value takes precedence
/// over the detected terminal size.
pub fn terminal_width() -> usize {
    columns_override(std::env::var("COLUMNS").ok().as_deref())
        .unwrap_or_else(|| match terminal_size() {
            (0, _) => DEFAULT_WIDTH,
            (cols, _) => cols as usize,
        })
}

fn columns_override(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&w| w > 0)
}

/// Create a BufWriter wrapping stdout with a generous buffer.
pub fn buffered_stdout() -> io::BufWriter<Stdout> {
    io::BufWriter::with_capacity(64 * 1024, io::stdout())
}
