//! System orchestration, startup, and shutdown logic.

pub mod pos_system;

pub use pos_system::*;
