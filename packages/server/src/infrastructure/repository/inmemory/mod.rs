//! インメモリ実装

pub mod attendance;

pub use attendance::InMemoryAttendanceRepository;
