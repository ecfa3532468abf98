//! Infrastructure layer for the report tree
//!
//! This module contains the implementations for external concerns: the
//! filesystem collaborators the generator hands its segments to, and the
//! centralized log messages.

pub mod filesystem;
pub mod log_messages;

pub use filesystem::*;
