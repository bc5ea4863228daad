//! Path-based flow control over a directed s-t capacity network.

pub mod analysis;
pub mod config;
pub mod control;
pub mod error;
pub mod graph;
pub mod scenario;
pub mod simulation;
pub mod state;
