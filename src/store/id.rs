//! Timestamp-derived record identifiers.
//!
//! An id is the wall-clock time in nanoseconds since the Unix epoch,
//! rendered as a decimal string. The generator lives inside the store's
//! lock and never issues a value twice: when the clock has not advanced
//! past the previous id it issues the previous id plus one.

use std::time::{SystemTime, UNIX_EPOCH};

/// Issues strictly increasing clock-based ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u128,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id from the current clock reading.
    pub fn next_id(&mut self) -> String {
        self.advance(clock_nanos()).to_string()
    }

    /// Returns `now`, or `last + 1` if the clock stalled or went backwards.
    fn advance(&mut self, now: u128) -> u128 {
        let id = if now > self.last { now } else { self.last + 1 };
        self.last = id;
        id
    }
}

fn clock_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}
