//! Domain layer for attendance tracking.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod clock;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use clock::Clock;
pub use entity::{AttendanceMark, AttendanceRecord, AttendanceStatus};
pub use error::{AttendanceError, RepositoryError, ValueObjectError};
pub use factory::ChannelIdFactory;
pub use repository::AttendanceRepository;
pub use value_object::{AttendanceDate, ChannelId, EmployeeId, GeoLocation, Timestamp};
