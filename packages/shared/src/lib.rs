//! Shared utilities for the Shukkin attendance server and its tests.

pub mod logger;
pub mod time;
