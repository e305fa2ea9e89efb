//! Timestamped event log.
//!
//! A small ring buffer of what the watchface did (connectivity changes,
//! overlay transitions, ignored gestures), shown on the simulator log page.
//! Lines are prefixed with the wall-clock time of the event:
//!
//! ```text
//! 12:04:31 tap: overlay showing
//! 12:04:32 hide timer armed
//! ```

use heapless::{Deque, String};

use crate::angles::WallTime;

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Maximum number of log lines to keep in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 12;

/// Maximum characters per log line, timestamp included.
pub const LOG_LINE_LENGTH: usize = 32;

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Ring buffer for event log messages.
///
/// Old messages are dropped when the buffer is full.
#[derive(Debug)]
pub struct EventLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl EventLog {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Push a message stamped with `time`. Long messages are truncated.
    pub fn push(
        &mut self,
        time: WallTime,
        msg: &str,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        push_timestamp(&mut line, time);
        line.push(' ').ok();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }

        self.buffer.push_back(line).ok();
    }

    /// Iterate over log messages (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(heapless::string::StringInner::as_str) }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Append `HH:MM:SS` to a heapless string (no format! macro).
pub fn push_timestamp<const N: usize>(
    s: &mut String<N>,
    time: WallTime,
) {
    push_two_digits(s, time.hour);
    s.push(':').ok();
    push_two_digits(s, time.minute);
    s.push(':').ok();
    push_two_digits(s, time.second);
}

/// Append a value as exactly two digits, zero padded.
pub fn push_two_digits<const N: usize>(
    s: &mut String<N>,
    val: u8,
) {
    let val = val % 100;
    s.push((b'0' + val / 10) as char).ok();
    s.push((b'0' + val % 10) as char).ok();
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_push() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.push(WallTime::new(9, 5, 7), "bt connected");
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next(), Some("09:05:07 bt connected"));
    }

    #[test]
    fn test_event_log_ring_buffer() {
        let mut log = EventLog::new();
        for second in 0..LOG_BUFFER_SIZE as u8 {
            log.push(WallTime::new(0, 0, second), "tick");
        }
        assert_eq!(log.len(), LOG_BUFFER_SIZE);

        log.push(WallTime::new(0, 1, 0), "new");
        assert_eq!(log.len(), LOG_BUFFER_SIZE);

        // Oldest line was dropped
        assert_eq!(log.iter().next(), Some("00:00:01 tick"));
        assert_eq!(log.iter().last(), Some("00:01:00 new"));
    }

    #[test]
    fn test_event_log_truncation() {
        let mut log = EventLog::new();
        log.push(WallTime::new(0, 0, 0), "a message far too long to fit on one log line");

        let stored = log.iter().next().unwrap();
        assert_eq!(stored.len(), LOG_LINE_LENGTH);
        assert!(stored.starts_with("00:00:00 a message"));
    }

    #[test]
    fn test_push_two_digits() {
        let mut s: String<8> = String::new();
        push_two_digits(&mut s, 0);
        push_two_digits(&mut s, 7);
        push_two_digits(&mut s, 59);
        assert_eq!(s.as_str(), "000759");
    }
}
