//! Source of "now" and of the local offset used to cut days.

use chrono::FixedOffset;

use super::{
    error::ValueObjectError,
    value_object::{AttendanceDate, Timestamp},
};

pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> Timestamp;

    /// Offset that defines local midnight
    fn offset(&self) -> FixedOffset;

    /// Today's date, normalized to local midnight
    fn today(&self) -> Result<AttendanceDate, ValueObjectError> {
        AttendanceDate::from_timestamp(self.now(), &self.offset())
    }
}
