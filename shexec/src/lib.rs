//! Discover command manifests under a directory and run each command once.
//!
//! A unit is a TOML file declaring an ordered `CMDS` array of shell command
//! strings. A run walks the tree deterministically, loads every unit, and
//! executes its commands in order, skipping any command string already run
//! earlier in the same run.
//!
//! - **[`core`]**: Pure, deterministic logic (result types, dedup table,
//!   manifest parsing). No I/O.
//! - **[`io`]**: Side-effecting operations (directory walk, file loading,
//!   process execution, config and report files).
//!
//! [`execute`] holds the per-command policy and [`run`] composes everything
//! into a run.

pub mod core;
pub mod execute;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
