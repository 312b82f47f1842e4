//! Infrastructure layer: storage, clocks, the connection registry and DTOs.

pub mod clock;
pub mod dto;
pub mod registry;
pub mod repository;

pub use clock::{FixedClock, SystemClock};
pub use registry::{ChannelHandle, ConnectionRegistry, OutboundFrame, RegistryError};
pub use repository::InMemoryAttendanceRepository;
