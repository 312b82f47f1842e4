//! Connection registry.
//!
//! Tracks every accepted realtime channel (so broadcasts reach all of them)
//! and the employee bound to each channel. An employee maps to at most one
//! channel and a channel to at most one employee.
//!
//! Broadcast is at-most-once and fire-and-forget: frames are pushed onto each
//! channel's unbounded queue, there is no acknowledgement, no backpressure and
//! no ordering guarantee across recipients.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::{Mutex, mpsc};

use crate::domain::{ChannelId, EmployeeId};

/// Frame queued for a channel's writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Text(String),
    /// Close the socket and stop writing
    Close,
}

/// Sending side of a channel
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    sender: mpsc::UnboundedSender<OutboundFrame>,
}

impl ChannelHandle {
    pub fn new(sender: mpsc::UnboundedSender<OutboundFrame>) -> Self {
        Self { sender }
    }

    /// Queue a text frame. Returns false if the channel is already gone.
    pub fn send_text(&self, text: String) -> bool {
        self.sender.send(OutboundFrame::Text(text)).is_ok()
    }

    /// Ask the writer task to close the socket.
    pub fn close(&self) -> bool {
        self.sender.send(OutboundFrame::Close).is_ok()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Channel '{0}' is not connected")]
    UnknownChannel(String),
}

#[derive(Default)]
struct RegistryInner {
    /// Every connected channel
    channels: HashMap<ChannelId, ChannelHandle>,
    /// employee -> channel
    employees: HashMap<EmployeeId, ChannelId>,
}

impl RegistryInner {
    fn employee_of(&self, channel: &ChannelId) -> Option<EmployeeId> {
        self.employees
            .iter()
            .find(|(_, c)| *c == channel)
            .map(|(e, _)| e.clone())
    }
}

/// Registry of live channels, owned by the server process
#[derive(Default)]
pub struct ConnectionRegistry {
    inner: Mutex<RegistryInner>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly accepted channel
    pub async fn connect(&self, channel: ChannelId, handle: ChannelHandle) {
        let mut inner = self.inner.lock().await;
        inner.channels.insert(channel, handle);
    }

    /// Bind `employee` to `channel`.
    ///
    /// If the employee was bound to another channel, that channel is closed
    /// and dropped from the registry first; its id is returned. If `channel`
    /// was bound to a different employee, that binding is released.
    pub async fn register(
        &self,
        employee: EmployeeId,
        channel: ChannelId,
    ) -> Result<Option<ChannelId>, RegistryError> {
        let mut inner = self.inner.lock().await;
        if !inner.channels.contains_key(&channel) {
            return Err(RegistryError::UnknownChannel(channel.into_string()));
        }

        if let Some(previous) = inner.employee_of(&channel)
            && previous != employee
        {
            tracing::info!(
                "Channel '{}' switches from employee '{}' to '{}'",
                channel,
                previous,
                employee
            );
            inner.employees.remove(&previous);
        }

        let evicted = match inner.employees.get(&employee).cloned() {
            Some(current) if current == channel => None,
            Some(current) => {
                if let Some(handle) = inner.channels.remove(&current) {
                    handle.close();
                }
                Some(current)
            }
            None => None,
        };

        inner.employees.insert(employee, channel);
        Ok(evicted)
    }

    /// Forget `channel`; returns the employee it was bound to, if any
    pub async fn unregister_by_channel(&self, channel: &ChannelId) -> Option<EmployeeId> {
        let mut inner = self.inner.lock().await;
        inner.channels.remove(channel);
        let employee = inner.employee_of(channel)?;
        inner.employees.remove(&employee);
        Some(employee)
    }

    /// Queue `text` on every connected channel; returns how many accepted it
    pub async fn broadcast(&self, text: &str) -> usize {
        let handles: Vec<(ChannelId, ChannelHandle)> = {
            let inner = self.inner.lock().await;
            inner
                .channels
                .iter()
                .map(|(id, handle)| (id.clone(), handle.clone()))
                .collect()
        };

        let mut delivered = 0;
        for (id, handle) in handles {
            if handle.send_text(text.to_string()) {
                delivered += 1;
            } else {
                tracing::debug!("Channel '{}' is gone, dropping broadcast", id);
            }
        }
        delivered
    }

    /// Channel currently bound to `employee`
    pub async fn channel_for(&self, employee: &EmployeeId) -> Option<ChannelId> {
        let inner = self.inner.lock().await;
        inner.employees.get(employee).cloned()
    }

    /// (employee, channel) bindings sorted by employee
    pub async fn snapshot(&self) -> Vec<(EmployeeId, ChannelId)> {
        let inner = self.inner.lock().await;
        let mut bindings: Vec<(EmployeeId, ChannelId)> = inner
            .employees
            .iter()
            .map(|(e, c)| (e.clone(), c.clone()))
            .collect();
        bindings.sort();
        bindings
    }

    pub async fn connected_count(&self) -> usize {
        self.inner.lock().await.channels.len()
    }

    /// Close and forget every channel; returns how many were closed
    pub async fn close_all(&self) -> usize {
        let mut inner = self.inner.lock().await;
        inner.employees.clear();
        let count = inner.channels.len();
        for (_, handle) in inner.channels.drain() {
            handle.close();
        }
        count
    }
}
