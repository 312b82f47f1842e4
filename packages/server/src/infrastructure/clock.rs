//! Clock implementations.

use chrono::FixedOffset;
use shukkin_shared::time::current_timestamp_millis;

use crate::domain::{Clock, Timestamp};

/// Wall clock in a configured offset.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(current_timestamp_millis())
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock frozen at a single instant, for tests and replays.
pub struct FixedClock {
    now: Timestamp,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: Timestamp, offset: FixedOffset) -> Self {
        Self { now, offset }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
