//! I/O helpers: filesystem discovery, unit loading, process execution.

pub mod config;
pub mod discover;
pub mod loader;
pub mod process;
pub mod report;
