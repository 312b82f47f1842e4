//! Repository trait for attendance records.
//!
//! The domain layer defines the contract; `infrastructure::repository`
//! provides the implementation (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::AttendanceRecord,
    error::RepositoryError,
    value_object::{AttendanceDate, EmployeeId},
};

/// Storage for attendance records keyed by (employee, date).
///
/// Implementations enforce the key uniqueness themselves: `insert` must
/// reject a second record for the same key and `save_check_out` must only
/// apply when the stored record is still open. Use cases rely on this
/// instead of their own read-then-write checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Look up the record for one employee on one day
    async fn find(
        &self,
        employee: &EmployeeId,
        date: AttendanceDate,
    ) -> Result<Option<AttendanceRecord>, RepositoryError>;

    /// Store a new record
    ///
    /// Fails with `RepositoryError::Duplicate` if the key already exists.
    async fn insert(&self, record: AttendanceRecord) -> Result<(), RepositoryError>;

    /// Persist the check-out of an existing record
    ///
    /// Fails with `RepositoryError::NotFound` if there is no record for the key
    /// and with `RepositoryError::Conflict` if the stored record already has a
    /// check-out.
    async fn save_check_out(&self, record: AttendanceRecord) -> Result<(), RepositoryError>;
}
