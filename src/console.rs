//! On-device log shown by the console screen
//!
//! Keeps the most recent `CONSOLE_CAPACITY` lines. Every line is also
//! forwarded to the `log` facade.

use std::collections::VecDeque;

pub const CONSOLE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    lines: VecDeque<String>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(CONSOLE_CAPACITY),
        }
    }

    /// Append a line, dropping the oldest when full
    pub fn log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::info!("[console] {}", msg);
        if self.lines.len() == CONSOLE_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(msg);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// A window of `count` lines ending `scroll` lines before the newest
    pub fn window(&self, count: usize, scroll: usize) -> Vec<&str> {
        let end = self.lines.len().saturating_sub(scroll);
        let start = end.saturating_sub(count);
        self.lines.range(start..end).map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_drops_oldest() {
        let mut console = ConsoleLog::new();
        for i in 0..(CONSOLE_CAPACITY + 5) {
            console.log(format!("line {i}"));
        }
        assert_eq!(console.len(), CONSOLE_CAPACITY);
        assert_eq!(console.lines().next(), Some("line 5"));
        assert_eq!(console.last(), Some("line 68"));
    }

    #[test]
    fn test_window_and_scroll() {
        let mut console = ConsoleLog::new();
        for i in 0..10 {
            console.log(format!("{i}"));
        }
        assert_eq!(console.window(3, 0), vec!["7", "8", "9"]);
        assert_eq!(console.window(3, 2), vec!["5", "6", "7"]);
        assert_eq!(console.window(3, 20), Vec::<&str>::new());
        assert_eq!(console.window(20, 0).len(), 10);
    }
}
