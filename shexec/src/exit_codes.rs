//! Stable exit codes for the `shexec` CLI.

/// Run completed. Individual commands may still have failed.
pub const OK: i32 = 0;
/// Fatal discovery error, invalid config, or report could not be written.
pub const FATAL: i32 = 1;
