//! Domain factories for creating domain entities and value objects.

use super::ChannelId;

/// Factory for generating ChannelId instances.
///
/// Keeps id generation apart from the validation in ChannelId.
pub struct ChannelIdFactory;

impl ChannelIdFactory {
    /// Generate a new ChannelId with a random UUID v4.
    pub fn generate() -> ChannelId {
        ChannelId::from_uuid(uuid::Uuid::new_v4())
    }
}
