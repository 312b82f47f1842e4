//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::AttendanceDate;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueObjectError {
    /// EmployeeId validation error
    #[error("EmployeeId cannot be empty")]
    EmployeeIdEmpty,

    /// ChannelId validation error
    #[error("ChannelId cannot be empty")]
    ChannelIdEmpty,

    /// Latitude outside [-90, 90] or not finite
    #[error("Latitude must be a finite value between -90 and 90 (got {0})")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180] or not finite
    #[error("Longitude must be a finite value between -180 and 180 (got {0})")]
    LongitudeOutOfRange(f64),

    /// Timestamp cannot be represented as a calendar date
    #[error("Timestamp is out of the supported range (got {0})")]
    TimestampOutOfRange(i64),
}

/// Errors related to AttendanceRecord state transitions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    /// Check-out is one-shot per day
    #[error("Check-out already recorded for {date}")]
    AlreadyCheckedOut { date: AttendanceDate },
}

/// Errors raised by attendance storage
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A record already exists for the (employee, date) key
    #[error("Attendance record already exists for employee '{employee}' on {date}")]
    Duplicate {
        employee: String,
        date: AttendanceDate,
    },

    /// No record exists for the (employee, date) key
    #[error("Attendance record not found for employee '{employee}' on {date}")]
    NotFound {
        employee: String,
        date: AttendanceDate,
    },

    /// The stored record changed underneath a conditional update
    #[error("Attendance record for employee '{employee}' on {date} was already checked out")]
    Conflict {
        employee: String,
        date: AttendanceDate,
    },

    /// The backing store failed
    #[error("Attendance store unavailable: {0}")]
    Unavailable(String),
}
