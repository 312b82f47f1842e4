//! Core domain models for attendance tracking.

use std::fmt;

use super::{
    error::AttendanceError,
    value_object::{AttendanceDate, EmployeeId, GeoLocation, Timestamp},
};

/// A single check-in or check-out mark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendanceMark {
    /// When the mark was recorded
    pub time: Timestamp,
    /// Where the employee was, if known
    pub location: Option<GeoLocation>,
}

impl AttendanceMark {
    pub fn new(time: Timestamp, location: Option<GeoLocation>) -> Self {
        Self { time, location }
    }
}

/// Attendance of one employee on one day.
///
/// A record only exists once the employee checked in, so `check_in` is not
/// optional; `check_out` is set at most once and never overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    /// Employee the record belongs to
    pub employee: EmployeeId,
    /// Local calendar day
    pub date: AttendanceDate,
    /// Check-in mark
    pub check_in: AttendanceMark,
    /// Check-out mark, once recorded
    pub check_out: Option<AttendanceMark>,
}

impl AttendanceRecord {
    /// Open the record for the day with a check-in
    pub fn check_in(employee: EmployeeId, date: AttendanceDate, mark: AttendanceMark) -> Self {
        Self {
            employee,
            date,
            check_in: mark,
            check_out: None,
        }
    }

    /// Close the record for the day
    ///
    /// # Errors
    ///
    /// Returns `AttendanceError::AlreadyCheckedOut` if a check-out is already recorded
    pub fn check_out(&mut self, mark: AttendanceMark) -> Result<(), AttendanceError> {
        if self.check_out.is_some() {
            return Err(AttendanceError::AlreadyCheckedOut { date: self.date });
        }
        self.check_out = Some(mark);
        Ok(())
    }

    pub fn is_checked_out(&self) -> bool {
        self.check_out.is_some()
    }

    pub fn status(&self) -> AttendanceStatus {
        if self.is_checked_out() {
            AttendanceStatus::CheckedOut
        } else {
            AttendanceStatus::CheckedIn
        }
    }
}

/// Per-employee, per-day attendance state.
///
/// `NotCheckedIn -> CheckedIn -> CheckedOut`; nothing leaves `CheckedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    NotCheckedIn,
    CheckedIn,
    CheckedOut,
}

impl AttendanceStatus {
    /// Derive the status from the day's record, if any
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        record.map_or(Self::NotCheckedIn, AttendanceRecord::status)
    }

    /// Human readable label used by the HTTP API
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotCheckedIn => "Not Checked In",
            Self::CheckedIn => "Checked In",
            Self::CheckedOut => "Checked Out",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
