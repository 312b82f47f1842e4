//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod check_in;
pub mod check_out;
pub mod disconnect_channel;
pub mod error;
pub mod get_status;
pub mod register_employee;
pub mod report_location;

pub use check_in::CheckInUseCase;
pub use check_out::CheckOutUseCase;
pub use disconnect_channel::DisconnectChannelUseCase;
pub use error::{CheckInError, CheckOutError, RegisterError, ReportLocationError, StatusError};
pub use get_status::{AttendanceStatusView, GetAttendanceStatusUseCase};
pub use register_employee::RegisterEmployeeUseCase;
pub use report_location::{GeofenceOutcome, LocationReport, ReportLocationUseCase};
