//! chess-server
//!
//! Multi-client async TCP server for one chess game with spectators.

pub mod config;
pub mod logging;
pub mod types;
pub mod server;

// these are internal modules, not re-exported
mod client;
mod session_task;
