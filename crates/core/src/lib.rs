//! Domain logic for the MindTwin wellness backend.
//!
//! This crate has no database or HTTP dependencies. Everything here operates
//! on plain values handed in by the caller.

pub mod chatbot;
pub mod error;
pub mod progress;
pub mod types;
pub mod wellness;
